use ratatui::layout::Rect;
use sitedesk::ui::LayoutManager;

#[test]
fn main_layout_reserves_one_status_line() {
    let area = Rect::new(0, 0, 120, 40);
    let chunks = LayoutManager::main_layout(area);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].height, 39);
    assert_eq!(chunks[1].height, 1);
    assert_eq!(chunks[1].y, 39);
}

#[test]
fn top_pane_splits_sidebar_and_main() {
    let area = Rect::new(0, 0, 120, 39);
    let chunks = LayoutManager::top_pane_layout(area, 28);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].width, 28);
    assert_eq!(chunks[0].width + chunks[1].width, 120);
}

#[test]
fn sidebar_never_exceeds_a_third_of_the_screen() {
    let area = Rect::new(0, 0, 60, 39);
    let chunks = LayoutManager::top_pane_layout(area, 28);

    assert_eq!(chunks[0].width, 20);
}

#[test]
fn centered_rect_is_centered() {
    let area = Rect::new(0, 0, 100, 50);
    let centered = LayoutManager::centered_rect(60, 20, area);

    assert_eq!(centered.width, 60);
    assert_eq!(centered.height, 10);
    assert_eq!(centered.x, 20);
    assert_eq!(centered.y, 20);
}

#[test]
fn centered_rect_lines_uses_fixed_height() {
    let area = Rect::new(0, 0, 100, 50);
    let centered = LayoutManager::centered_rect_lines(50, 14, area);

    assert_eq!(centered.height, 14);
    assert_eq!(centered.width, 50);
}
