//! Tab bar rendering

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs as RataTabs;
use ratatui::Frame;

use crate::app::App;

/// Draw the permitted tabs; Users only appears for administrators
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_tabs();
    let titles: Vec<Line> = visible
        .iter()
        .map(|tab| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", tab.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(tab.title()),
            ])
        })
        .collect();

    let selected = visible
        .iter()
        .position(|tab| *tab == app.active_tab())
        .unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, area);
}
