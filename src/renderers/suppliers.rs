use crossterm::event::KeyEvent;

use super::{crud_key, navigation_key, or_dash, Renderer, Table, TableRow, TableView};
use crate::core::{Action, Module};
use crate::domain::{Dataset, Query, Supplier};
use crate::router::Tab;

impl TableRow for Supplier {
    const NOUN: &'static str = "Supplier";
    const HEADERS: &'static [&'static str] =
        &["ID", "Name", "Contact", "Email", "Phone", "Address"];
    const WIDTHS: &'static [u16] = &[6, 20, 16, 20, 14, 24];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.contact.clone(),
            or_dash(self.email.as_deref()),
            or_dash(self.phone.as_deref()),
            or_dash(self.address.as_deref()),
        ]
    }
}

#[derive(Debug, Default)]
pub struct SuppliersView {
    table: Table<Supplier>,
}

impl SuppliersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &Table<Supplier> {
        &self.table
    }
}

impl Module for SuppliersView {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let load = self.load();
        if let Some(action) = navigation_key(&mut self.table, key, load) {
            return action;
        }
        crud_key(&self.table, key).unwrap_or(Action::None)
    }
}

impl Renderer for SuppliersView {
    fn tab(&self) -> Tab {
        Tab::Suppliers
    }

    fn load(&self) -> Query {
        Query::Suppliers
    }

    fn search(&self, term: &str) -> Query {
        let term = term.trim();
        if term.is_empty() {
            return self.load();
        }
        Query::SearchSuppliers(term.to_string())
    }

    fn apply(&mut self, dataset: Dataset) -> bool {
        match dataset {
            Dataset::Suppliers(rows) => {
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
            format!("Suppliers ({})", self.table.len()),
            &self.table,
            "a add  e edit  d delete  / search  r refresh",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query() {
        let view = SuppliersView::new();
        assert_eq!(view.search(""), Query::Suppliers);
        assert_eq!(view.search("acme"), Query::SearchSuppliers("acme".into()));
    }

    #[test]
    fn test_missing_contact_fields_render_as_dash() {
        let supplier = Supplier {
            id: 2,
            name: "Acme".into(),
            contact: "Wile".into(),
            email: Some(String::new()),
            phone: None,
            address: Some("Desert Rd".into()),
        };
        assert_eq!(
            supplier.cells(),
            vec!["2", "Acme", "Wile", "-", "-", "Desert Rd"]
        );
    }
}
