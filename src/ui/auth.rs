//! Login and registration screens

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::layout::centered_box;
use crate::app::App;
use crate::domain::Role;
use crate::forms::{RegisterForm, TextField};

pub fn draw_login(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.login_form;
    let mut lines = vec![
        Line::from(Span::styled(
            "Stockdesk",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.api_endpoint.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        field_line("Username", &form.username, form.focus == 0),
        field_line("Password", &form.password, form.focus == 1),
        Line::from(""),
    ];
    lines.push(busy_or_hint(
        app.loading,
        "Enter login  Tab next field  F2 register  Esc quit",
    ));

    draw_card(f, area, " Login ", lines);
}

pub fn draw_register(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.register_form;
    let mut lines = vec![
        Line::from(Span::styled(
            "Create an account",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_line("Username", &form.username, form.focus == 0),
        field_line("Password", &form.password, form.focus == 1),
        field_line("Confirm", &form.confirm, form.focus == 2),
        role_line(form),
        Line::from(""),
    ];
    lines.push(busy_or_hint(
        app.loading,
        "Enter register  ←/→ role  F2/Esc back to login",
    ));

    draw_card(f, area, " Register ", lines);
}

fn draw_card(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16 + 2;
    let card = centered_box(60, height, area);
    f.render_widget(Clear, card);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, card);
}

fn field_line(label: &str, field: &TextField, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut value = field.display();
    if focused {
        value.push('_');
    }
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, value_style),
    ])
}

fn role_line(form: &RegisterForm) -> Line<'static> {
    let focused = form.focus == RegisterForm::ROLE_FIELD;
    let marker = if focused { "> " } else { "  " };
    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{:<10}", "Role"), Style::default().fg(Color::DarkGray)),
    ];
    for role in Role::ALL {
        let style = if role == form.role {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", role.as_str()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn busy_or_hint(loading: bool, hint: &str) -> Line<'static> {
    if loading {
        Line::from(Span::styled(
            "Working…",
            Style::default().fg(Color::LightYellow),
        ))
    } else {
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    }
}
