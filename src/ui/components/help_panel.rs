//! Help panel component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::app::App;
use super::super::layout::LayoutManager;

const HELP_TEXT: &str = "\
Navigation
  j / Down       next item
  k / Up         previous item
  Tab            next project
  b              budgets view
  g              documentation view
  o              viewer overlays view
  w              site weather view
  r              refresh project data

Budgets
  a              activate a budget request (runs eligibility checks)

Documentation
  u              upload a document
  f              show file versions
  x              delete selected document

Viewer
  space          toggle overlay visibility
  +/-            step overlay opacity

Versions
  V              select the active project version

Other
  L              show debug logs
  ?              toggle this help
  q              quit";

/// Scrollable help panel
pub struct HelpPanel;

impl HelpPanel {
    pub fn render(f: &mut Frame, app: &App) {
        let (width, height) = LayoutManager::help_panel_dimensions(f.area().width, f.area().height);
        let area = LayoutManager::centered_rect(width, height, f.area());
        f.render_widget(Clear, area);

        let visible: String = HELP_TEXT
            .lines()
            .skip(app.help_scroll_offset)
            .collect::<Vec<_>>()
            .join("\n");

        let paragraph = Paragraph::new(visible)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help  (j/k: scroll, ?: close)")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(paragraph, area);
    }

    /// Number of lines in the help text, used to bound scrolling.
    pub fn line_count() -> usize {
        HELP_TEXT.lines().count()
    }
}
