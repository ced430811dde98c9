//! Credit purchase confirmation dialog component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::super::app::App;
use super::super::super::layout::LayoutManager;

/// Credit purchase confirmation dialog component
pub struct CreditPurchaseDialog;

impl CreditPurchaseDialog {
    /// Render the credit purchase confirmation dialog
    pub fn render(f: &mut Frame, app: &App) {
        if let Some(amount) = app.purchase_confirmation {
            let area = LayoutManager::centered_rect(60, 25, f.area());
            f.render_widget(Clear, area);

            let text = format!(
                "Purchase {amount} credits?\n\nVerification restarts automatically after the purchase.\n\nPress 'y' to confirm or 'n'/Esc to cancel",
            );

            let paragraph = Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Purchase credits")
                        .title_alignment(Alignment::Center),
                )
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
    }
}
