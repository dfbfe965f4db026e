//! Entity renderers - one table view per tab
//!
//! A renderer owns the rows currently on screen, knows which query fills
//! them, and turns its keys into [`Action`]s. Mutations are placeholders that
//! only raise a notification.

mod products;
mod suppliers;
mod transactions;
mod users;

pub use products::ProductsView;
pub use suppliers::SuppliersView;
pub use transactions::{TransactionsView, NOT_SEARCHABLE};
pub use users::UsersView;

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Module, PromptKind};
use crate::domain::{Dataset, Query};
use crate::notify::ToastLevel;
use crate::router::Tab;

/// A record that can be shown as one table row
pub trait TableRow {
    /// Singular entity name used in placeholder messages
    const NOUN: &'static str;
    const HEADERS: &'static [&'static str];
    /// Column widths in percent
    const WIDTHS: &'static [u16];

    fn id(&self) -> i64;
    fn cells(&self) -> Vec<String>;
}

/// Rows plus the selected index
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
    selected: usize,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
        }
    }
}

impl<T> Table<T> {
    /// Clear the table, then fill it with `rows`
    pub fn replace(&mut self, rows: Vec<T>) {
        self.rows.clear();
        self.rows.extend(rows);
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.selected = 0;
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.rows.is_empty()).then_some(self.selected)
    }

    pub fn selected(&self) -> Option<&T> {
        self.rows.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }
}

/// Everything the UI needs to draw one renderer
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub title: String,
    pub headers: &'static [&'static str],
    pub widths: &'static [u16],
    pub rows: Vec<Vec<String>>,
    pub selected: Option<usize>,
    pub hints: &'static str,
}

impl TableView {
    pub fn of<T: TableRow>(title: String, table: &Table<T>, hints: &'static str) -> Self {
        Self {
            title,
            headers: T::HEADERS,
            widths: T::WIDTHS,
            rows: table.rows().iter().map(TableRow::cells).collect(),
            selected: table.selected_index(),
            hints,
        }
    }
}

/// Behaviour shared by every entity tab
pub trait Renderer: Module {
    fn tab(&self) -> Tab;

    /// Query for the full collection
    fn load(&self) -> Query;

    /// Query for a search; a blank term means a full load
    fn search(&self, term: &str) -> Query;

    fn refresh(&self) -> Query {
        self.load()
    }

    /// Whether `search` reaches a real search endpoint
    fn searchable(&self) -> bool {
        true
    }

    /// Replace the table with `dataset` if it belongs to this renderer
    fn apply(&mut self, dataset: Dataset) -> bool;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn view(&self) -> TableView;
}

/// Keys every table understands: selection, search, refresh
pub(crate) fn navigation_key<T>(
    table: &mut Table<T>,
    key: KeyEvent,
    load: Query,
) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => table.move_up(),
        KeyCode::Down | KeyCode::Char('j') => table.move_down(),
        KeyCode::Home | KeyCode::Char('g') => table.first(),
        KeyCode::End | KeyCode::Char('G') => table.last(),
        KeyCode::Char('/') => return Some(Action::Prompt(PromptKind::Search)),
        KeyCode::Char('r') => return Some(Action::Fetch(load)),
        _ => return None,
    }
    Some(Action::None)
}

/// Add/edit/delete placeholders for the selected row
pub(crate) fn crud_key<T: TableRow>(table: &Table<T>, key: KeyEvent) -> Option<Action> {
    let noun = T::NOUN;
    match key.code {
        KeyCode::Char('a') => Some(placeholder(format!("Add {noun} modal"))),
        KeyCode::Char('e') => Some(
            table
                .selected()
                .map(|row| placeholder(format!("Edit {noun} {}", row.id())))
                .unwrap_or(Action::None),
        ),
        KeyCode::Char('d') => Some(
            table
                .selected()
                .map(|row| Action::Confirm {
                    message: format!(
                        "Are you sure you want to delete this {}?",
                        noun.to_lowercase()
                    ),
                    then: Box::new(placeholder(format!("Delete {noun} {}", row.id()))),
                })
                .unwrap_or(Action::None),
        ),
        _ => None,
    }
}

pub(crate) fn placeholder(what: String) -> Action {
    Action::Notify(format!("{what} - To be implemented"), ToastLevel::Info)
}

/// `-` for absent optional text
pub(crate) fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "-".to_string(),
    }
}
