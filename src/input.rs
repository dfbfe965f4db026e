//! Key dispatch from crossterm into the app

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode, Screen};
use crate::core::{parse_command, Module, PromptKind};
use crate::forms::FormEvent;
use crate::router::Tab;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.screen {
        Screen::Login => handle_login(app, key),
        Screen::Register => handle_register(app, key),
        Screen::Main => handle_main(app, key),
    }
}

fn handle_login(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.should_quit = true;
        return;
    }
    match app.login_form.handle_key(key) {
        FormEvent::Submit => app.submit_login(),
        FormEvent::SwitchForm => app.show_register(),
        FormEvent::Edited | FormEvent::Ignored => {}
    }
}

fn handle_register(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.show_login();
        return;
    }
    match app.register_form.handle_key(key) {
        FormEvent::Submit => app.submit_register(),
        FormEvent::SwitchForm => app.show_login(),
        FormEvent::Edited | FormEvent::Ignored => {}
    }
}

fn handle_main(app: &mut App, key: KeyEvent) {
    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Prompt(kind) => handle_prompt_mode(app, key, kind),
        InputMode::Confirm => handle_confirm_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char(':') => {
            app.command.input.clear();
            app.input_mode = InputMode::Command;
        }
        KeyCode::Char('L') => app.logout(),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.cycle_tab(true),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.cycle_tab(false),
        KeyCode::Char(ch) if Tab::from_shortcut(ch).is_some() => {
            if let Some(tab) = Tab::from_shortcut(ch) {
                app.switch_tab(tab);
            }
        }
        _ => {
            let tab = app.active_tab();
            let action = app.renderer_mut(tab).handle_key(key);
            app.apply_action(action);
        }
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.command.input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => apply_command(app),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn apply_command(app: &mut App) {
    let input = std::mem::take(&mut app.command.input);
    app.input_mode = InputMode::Normal;
    if input.trim().is_empty() {
        return;
    }
    let cmd = parse_command(&input);
    app.command.last = Some(input);
    let action = app.execute_command(&cmd);
    app.apply_action(action);
}

fn handle_prompt_mode(app: &mut App, key: KeyEvent, _kind: PromptKind) {
    match key.code {
        KeyCode::Esc => {
            app.prompt_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Backspace => {
            app.prompt_input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.prompt_input.push(ch);
        }
        _ => {}
    }
}

fn handle_confirm_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_confirm(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_confirm(false),
        _ => {}
    }
}

/// Feed a whole string as key presses (used by tests and scripted input)
pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        handle_key(app, KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
    }
}

/// Convenience for a single unmodified key
pub fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoginResponse, Query, Role};
    use crate::infrastructure::runtime::{RuntimeCommand, RuntimeEvent};
    use crate::notify::{ToastLevel, DEFAULT_TTL};
    use crate::session::SessionManager;
    use crate::store::MemoryStore;

    fn main_screen(role: Role) -> App {
        let mut app = App::new(SessionManager::new(Box::new(MemoryStore::new())), DEFAULT_TTL);
        app.apply_event(RuntimeEvent::LoggedIn(LoginResponse {
            token: "t1".into(),
            user_id: 2,
            username: "sam".into(),
            role,
        }));
        app.take_requests();
        app
    }

    #[test]
    fn test_login_form_submit_queues_login() {
        let mut app = App::new(SessionManager::new(Box::new(MemoryStore::new())), DEFAULT_TTL);
        type_text(&mut app, "alice");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.take_requests(),
            vec![RuntimeCommand::Login {
                username: "alice".into(),
                password: "pw".into()
            }]
        );
        assert!(app.loading);
    }

    #[test]
    fn test_search_prompt_dispatches_query() {
        let mut app = main_screen(Role::Staff);
        press(&mut app, KeyCode::Char('2'));
        app.take_requests();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "acme");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.take_requests(),
            vec![RuntimeCommand::Fetch {
                query: Query::SearchSuppliers("acme".into()),
                token: Some("t1".into())
            }]
        );
    }

    #[test]
    fn test_command_bar_refresh() {
        let mut app = main_screen(Role::Manager);
        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "refresh");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.command.last.as_deref(), Some("refresh"));
        assert_eq!(
            app.take_requests(),
            vec![RuntimeCommand::Fetch {
                query: Query::Products,
                token: Some("t1".into())
            }]
        );
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut app = main_screen(Role::Admin);
        app.apply_event(RuntimeEvent::Loaded {
            query: Query::Products,
            token: Some("t1".into()),
            dataset: crate::domain::Dataset::Products(vec![crate::domain::Product {
                id: 3,
                name: "Widget".into(),
                sku: "W".into(),
                category: "Tools".into(),
                price: 1.0,
                qty: 1,
                description: None,
            }]),
        });
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.input_mode, InputMode::Confirm);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(
            app.status_text(),
            Some(("Delete Product 3 - To be implemented", ToastLevel::Info))
        );
    }

    #[test]
    fn test_shortcut_to_users_denied_for_staff() {
        let mut app = main_screen(Role::Staff);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.active_tab(), Tab::Products);
        assert!(app.take_requests().is_empty());
    }
}
