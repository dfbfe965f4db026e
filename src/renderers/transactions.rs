use crossterm::event::{KeyCode, KeyEvent};

use super::{crud_key, navigation_key, or_dash, Renderer, Table, TableRow, TableView};
use crate::core::{Action, Module};
use crate::domain::{Dataset, Query, Transaction};
use crate::notify::ToastLevel;
use crate::router::Tab;

impl TableRow for Transaction {
    const NOUN: &'static str = "Transaction";
    const HEADERS: &'static [&'static str] = &[
        "ID", "Product", "Qty", "Type", "Date", "User", "Batch", "Lot", "Notes",
    ];
    const WIDTHS: &'static [u16] = &[5, 14, 6, 12, 18, 10, 10, 10, 15];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        let product = match self.product.name.as_deref() {
            Some(name) => format!("{} {}", self.product.id, name),
            None => self.product.id.to_string(),
        };
        let user = match self.user.username.as_deref() {
            Some(name) => format!("{} {}", self.user.id, name),
            None => self.user.id.to_string(),
        };
        vec![
            self.id.to_string(),
            product,
            self.qty.to_string(),
            self.kind.as_str().to_string(),
            self.display_date(),
            user,
            or_dash(self.batch_number.as_deref()),
            or_dash(self.lot_number.as_deref()),
            or_dash(self.notes.as_deref()),
        ]
    }
}

pub const NOT_SEARCHABLE: &str = "Transactions cannot be searched";

/// Read-only ledger of stock movements
#[derive(Debug, Default)]
pub struct TransactionsView {
    table: Table<Transaction>,
}

impl TransactionsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &Table<Transaction> {
        &self.table
    }
}

impl Module for TransactionsView {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('/') {
            return Action::Notify(NOT_SEARCHABLE.to_string(), ToastLevel::Warn);
        }
        let load = self.load();
        if let Some(action) = navigation_key(&mut self.table, key, load) {
            return action;
        }
        match key.code {
            KeyCode::Char('a') => crud_key(&self.table, key).unwrap_or(Action::None),
            _ => Action::None,
        }
    }
}

impl Renderer for TransactionsView {
    fn tab(&self) -> Tab {
        Tab::Transactions
    }

    fn load(&self) -> Query {
        Query::Transactions
    }

    /// No search endpoint exists; every search is a full load
    fn search(&self, _term: &str) -> Query {
        self.load()
    }

    fn searchable(&self) -> bool {
        false
    }

    fn apply(&mut self, dataset: Dataset) -> bool {
        match dataset {
            Dataset::Transactions(rows) => {
                self.table.replace(rows);
                true
            }
            _ => false,
        }
    }

    fn clear(&mut self) {
        self.table.clear();
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn view(&self) -> TableView {
        TableView::of(
            format!("Transactions ({})", self.table.len()),
            &self.table,
            "a add  r refresh",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductRef, TransactionType, UserRef};
    use crossterm::event::KeyModifiers;

    fn sale() -> Transaction {
        Transaction {
            id: 11,
            product: ProductRef {
                id: 3,
                name: Some("Widget".into()),
            },
            qty: 2,
            kind: TransactionType::Sale,
            date: "2024-03-01T09:15:00".into(),
            user: UserRef {
                id: 5,
                username: None,
            },
            batch_number: None,
            lot_number: Some("L-9".into()),
            notes: None,
        }
    }

    #[test]
    fn test_row_cells() {
        assert_eq!(
            sale().cells(),
            vec![
                "11",
                "3 Widget",
                "2",
                "SALE",
                "2024-03-01 09:15:00",
                "5",
                "-",
                "L-9",
                "-"
            ]
        );
    }

    #[test]
    fn test_unknown_type_shown_verbatim() {
        let mut tx = sale();
        tx.kind = TransactionType::from("TRANSFER".to_string());
        assert_eq!(tx.cells()[3], "TRANSFER");
    }

    #[test]
    fn test_edit_and_delete_are_not_offered() {
        let mut view = TransactionsView::new();
        view.apply(Dataset::Transactions(vec![sale()]));
        let edit = view.handle_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE));
        let delete = view.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE));
        assert_eq!(edit, Action::None);
        assert_eq!(delete, Action::None);
    }
}
