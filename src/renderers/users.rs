use crossterm::event::KeyEvent;

use super::{crud_key, navigation_key, Renderer, Table, TableRow, TableView};
use crate::core::{Action, Module};
use crate::domain::{Dataset, Query, User};
use crate::router::Tab;

impl TableRow for User {
    const NOUN: &'static str = "User";
    const HEADERS: &'static [&'static str] = &["ID", "Username", "Role"];
    const WIDTHS: &'static [u16] = &[10, 60, 30];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            self.role.to_string(),
        ]
    }
}

/// Administrator-only user list
#[derive(Debug, Default)]
pub struct UsersView {
    table: Table<User>,
    filter: Option<String>,
}

impl UsersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &Table<User> {
        &self.table
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

/// Case-insensitive username substring match
pub fn matches_username(user: &User, term: &str) -> bool {
    user.username.to_lowercase().contains(&term.to_lowercase())
}

impl Module for UsersView {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let load = self.load();
        if let Some(action) = navigation_key(&mut self.table, key, load) {
            return action;
        }
        crud_key(&self.table, key).unwrap_or(Action::None)
    }
}

impl Renderer for UsersView {
    fn tab(&self) -> Tab {
        Tab::Users
    }

    fn load(&self) -> Query {
        Query::Users
    }

    /// Fetches every user; the term is applied when the rows arrive
    fn search(&self, term: &str) -> Query {
        let term = term.trim();
        if term.is_empty() {
            return self.load();
        }
        Query::SearchUsers(term.to_string())
    }

    fn apply(&mut self, dataset: Dataset) -> bool {
        match dataset {
            Dataset::Users { users, filter } => {
                let rows = match filter.as_deref() {
                    Some(term) => users
                        .into_iter()
                        .filter(|user| matches_username(user, term))
                        .collect(),
                    None => users,
                };
                self.table.replace(rows);
                self.filter = filter;
                true
            }
            _ => false,
        }
    }

    fn clear(&mut self) {
        self.table.clear();
        self.filter = None;
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn view(&self) -> TableView {
        let title = match self.filter.as_deref() {
            Some(term) => format!("Users ({}) matching \"{}\"", self.table.len(), term),
            None => format!("Users ({})", self.table.len()),
        };
        TableView::of(title, &self.table, "a add  e edit  d delete  / search  r refresh")
    }
}
