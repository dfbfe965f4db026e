use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

pub mod auth;
pub mod layout;
pub mod tabs;

use crate::app::{App, InputMode, Screen};
use crate::core::PromptKind;
use crate::notify::ToastLevel;
use crate::router::Tab;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    match app.screen {
        Screen::Login => {
            auth::draw_login(f, size, app);
            draw_toast_overlay(f, size, app);
            return;
        }
        Screen::Register => {
            auth::draw_register(f, size, app);
            draw_toast_overlay(f, size, app);
            return;
        }
        Screen::Main => {}
    }

    let areas = layout::areas(size);

    draw_header(f, areas.header, app);
    tabs::draw_tab_bar(f, areas.tabs, app);
    draw_table(f, areas.main, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if let Some(pending) = app.pending_confirm.as_ref() {
        draw_confirm_popup(f, areas.size, &pending.message);
    }
    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "Stockdesk",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", app.api_endpoint)),
    ]);

    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let mut right_spans = Vec::new();
    if let Some(session) = app.session.current() {
        right_spans.push(Span::raw(format!("Welcome, {}", session.user.username)));
        right_spans.push(Span::raw("  "));
        right_spans.push(Span::styled(
            session.user.role.as_str(),
            role_style(session.user.role.is_admin()),
        ));
    }
    if app.loading {
        right_spans.push(Span::styled(
            "  loading…",
            Style::default().fg(Color::LightYellow),
        ));
    }
    let right = Paragraph::new(Line::from(right_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn role_style(admin: bool) -> Style {
    if admin {
        Style::default()
            .fg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::LightGreen)
    }
}

fn draw_table(f: &mut Frame, area: Rect, app: &App) {
    let tab = app.active_tab();
    let view = app.renderer(tab).view();

    let header = Row::new(
        view.headers
            .iter()
            .map(|title| Cell::from(*title).style(Style::default().fg(Color::DarkGray))),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let type_column = (tab == Tab::Transactions)
        .then(|| view.headers.iter().position(|h| *h == "Type"))
        .flatten();

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|cells| {
            Row::new(cells.iter().enumerate().map(|(idx, text)| {
                let cell = Cell::from(text.clone());
                if Some(idx) == type_column {
                    cell.style(transaction_badge(text))
                } else {
                    cell
                }
            }))
        })
        .collect();

    let widths: Vec<Constraint> = view
        .widths
        .iter()
        .map(|pct| Constraint::Percentage(*pct))
        .collect();

    let empty = rows.is_empty();
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ", view.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    let mut state = TableState::default();
    state.select(view.selected);
    f.render_stateful_widget(table, area, &mut state);

    if empty {
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 3,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        if inner.y < area.y + area.height.saturating_sub(1) {
            let text = if app.loading { "Loading…" } else { "No records" };
            f.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
        }
    }
}

fn transaction_badge(kind: &str) -> Style {
    let color = match kind {
        "STOCK_IN" | "PURCHASE" | "RETURN" => Color::LightGreen,
        "STOCK_OUT" | "SALE" => Color::LightRed,
        "ADJUSTMENT" => Color::LightYellow,
        _ => Color::Gray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let tab = app.active_tab();
    let view = app.renderer(tab).view();
    let line = Line::from(vec![
        Span::styled("Tab ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", tab.title())),
        Span::styled("Rows ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", view.rows.len())),
        Span::styled(view.hints, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("products", "Go to products"),
        ("suppliers", "Go to suppliers"),
        ("transactions", "Go to transactions"),
        ("users", "Go to users (admin)"),
        ("search", "Search the current tab"),
        ("category", "Filter products by category"),
        ("refresh", "Reload the current tab"),
        ("logout", "End the session"),
        ("help", "Show key bindings"),
        ("quit", "Exit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn toast_color(level: ToastLevel) -> Color {
    match level {
        ToastLevel::Success => Color::LightGreen,
        ToastLevel::Info => Color::LightCyan,
        ToastLevel::Warn => Color::LightYellow,
        ToastLevel::Error => Color::LightRed,
    }
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint_text = command_hint(&app.command.input)
                .unwrap_or("products | search <term> | category <name> | logout");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.as_str()),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Prompt(kind) => {
            let help = match kind {
                PromptKind::Search => "empty=show all, Enter=ok Esc=cancel",
                PromptKind::Category => "empty=all categories, Enter=ok Esc=cancel",
            };
            Line::from(vec![
                Span::styled(
                    format!("> {} ", kind.label().to_lowercase()),
                    Style::default().fg(Color::LightCyan),
                ),
                Span::raw(app.prompt_input.as_str()),
                Span::styled(format!("  ({help})"), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Confirm => Line::from(Span::styled(
            "y=confirm  n=cancel",
            Style::default().fg(Color::LightYellow),
        )),
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", level.label()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(text, Style::default().fg(toast_color(level))),
                ])
            } else {
                Line::from(Span::styled(
                    "1-4 tabs  Tab cycle  : command  ? help  L logout  q quit",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

/// Toast in the bottom row when there is no command line (auth screens)
fn draw_toast_overlay(f: &mut Frame, area: Rect, app: &App) {
    let Some((text, level)) = app.status_text() else {
        return;
    };
    if area.height == 0 {
        return;
    }
    let row = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(toast_color(level)),
    )))
    .alignment(Alignment::Center);
    f.render_widget(paragraph, row);
}

fn draw_confirm_popup(f: &mut Frame, area: Rect, message: &str) {
    let popup_area = layout::centered_box(message.chars().count() as u16 + 8, 5, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[y] yes   [n] no",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightYellow)),
        )
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = layout::centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from("Navigation"),
        Line::from("  1-4          Jump to tab"),
        Line::from("  Tab / h / l  Next / previous tab"),
        Line::from("  j / k        Move selection"),
        Line::from("  g / G        Top / bottom"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  /            Search current tab"),
        Line::from("  c            Category filter (Products)"),
        Line::from("  r            Refresh"),
        Line::from("  a / e / d    Add / edit / delete"),
        Line::from("  i / o        Stock in / out (Products)"),
        Line::from("  :            Command bar"),
        Line::from("  L            Logout"),
        Line::from("  ?            Toggle help"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :products :suppliers :transactions :users"),
        Line::from("  :search <term>  :category <name>  :refresh"),
        Line::from("  :logout  :help  :quit"),
    ];
    if let Some(welcome) = app.welcome() {
        lines.push(Line::from(""));
        lines.push(Line::from(welcome));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_hint_prefix() {
        assert_eq!(command_hint("cat"), Some("Filter products by category"));
        assert_eq!(command_hint("zzz"), None);
        assert_eq!(command_hint(""), None);
    }
}
