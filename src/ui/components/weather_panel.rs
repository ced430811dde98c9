//! Site weather and air-quality panel

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::super::app::App;
use crate::utils::datetime;

/// Main panel showing the latest weather reading for the project site
pub struct WeatherPanel;

fn air_quality_label(index: u16) -> (&'static str, Color) {
    match index {
        0..=50 => ("good", Color::Green),
        51..=100 => ("moderate", Color::Yellow),
        101..=150 => ("unhealthy for sensitive groups", Color::LightRed),
        _ => ("unhealthy", Color::Red),
    }
}

impl WeatherPanel {
    pub fn render(f: &mut Frame, area: Rect, app: &App) {
        let title = match app.selected_project() {
            Some(project) => match &project.location {
                Some(location) => format!("Site weather - {location}"),
                None => format!("Site weather - {}", project.name),
            },
            None => "Site weather".to_string(),
        };

        let lines = match &app.weather {
            Some(report) => {
                let (aqi_label, aqi_color) = air_quality_label(report.air_quality_index);
                vec![
                    Line::from(Span::styled(
                        format!(
                            "{} {}  {:.1} C",
                            app.icons.weather(&report.condition),
                            report.condition,
                            report.temperature_c
                        ),
                        Style::default().fg(Color::White),
                    )),
                    Line::from(format!(
                        "Wind {:.0} km/h   Humidity {}%",
                        report.wind_kmh, report.humidity_pct
                    )),
                    Line::from(vec![
                        Span::raw(format!("Air quality {} ", report.air_quality_index)),
                        Span::styled(format!("({aqi_label})"), Style::default().fg(aqi_color)),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "Updated {}",
                            datetime::format_timestamp(report.fetched_at.as_deref())
                        ),
                        Style::default().fg(Color::DarkGray),
                    )),
                ]
            }
            None if app.weather_task.is_some() => {
                vec![Line::from("Fetching site weather...")]
            }
            None => vec![Line::from("No reading yet. Press w to fetch.")],
        };

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Left);

        f.render_widget(paragraph, area);
    }
}
