use crossterm::event::{KeyCode, KeyEvent};

use super::{crud_key, navigation_key, or_dash, placeholder, Renderer, Table, TableRow, TableView};
use crate::core::{Action, Module, PromptKind};
use crate::domain::{Dataset, Product, Query};
use crate::router::Tab;

impl TableRow for Product {
    const NOUN: &'static str = "Product";
    const HEADERS: &'static [&'static str] =
        &["ID", "Name", "SKU", "Category", "Price", "Qty", "Description"];
    const WIDTHS: &'static [u16] = &[6, 20, 12, 14, 10, 8, 30];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.sku.clone(),
            self.category.clone(),
            format!("${}", self.price),
            self.qty.to_string(),
            or_dash(self.description.as_deref()),
        ]
    }
}

#[derive(Debug, Default)]
pub struct ProductsView {
    table: Table<Product>,
}

impl ProductsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &Table<Product> {
        &self.table
    }

    /// Query for one category; a blank category means a full load
    pub fn filter_category(&self, category: &str) -> Query {
        let category = category.trim();
        if category.is_empty() {
            return self.load();
        }
        Query::ProductsByCategory(category.to_string())
    }
}

impl Module for ProductsView {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let load = self.load();
        if let Some(action) = navigation_key(&mut self.table, key, load) {
            return action;
        }
        if let Some(action) = crud_key(&self.table, key) {
            return action;
        }
        match key.code {
            KeyCode::Char('c') => Action::Prompt(PromptKind::Category),
            KeyCode::Char('i') => placeholder("Stock in modal".to_string()),
            KeyCode::Char('o') => placeholder("Stock out modal".to_string()),
            _ => Action::None,
        }
    }
}

impl Renderer for ProductsView {
    fn tab(&self) -> Tab {
        Tab::Products
    }

    fn load(&self) -> Query {
        Query::Products
    }

    fn search(&self, term: &str) -> Query {
        let term = term.trim();
        if term.is_empty() {
            return self.load();
        }
        Query::SearchProducts(term.to_string())
    }

    fn apply(&mut self, dataset: Dataset) -> bool {
        match dataset {
            Dataset::Products(rows) => {
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
            format!("Products ({})", self.table.len()),
            &self.table,
            "a add  e edit  d delete  i/o stock  / search  c category  r refresh",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastLevel;
    use crossterm::event::KeyModifiers;

    fn widget(id: i64) -> Product {
        Product {
            id,
            name: "Widget".into(),
            sku: "W-1".into(),
            category: "Tools".into(),
            price: 9.5,
            qty: 4,
            description: None,
        }
    }

    #[test]
    fn test_blank_search_and_filter_load_everything() {
        let view = ProductsView::new();
        assert_eq!(view.search("   "), Query::Products);
        assert_eq!(view.filter_category(""), Query::Products);
        assert_eq!(view.search(" bolt "), Query::SearchProducts("bolt".into()));
        assert_eq!(
            view.filter_category("Tools"),
            Query::ProductsByCategory("Tools".into())
        );
    }

    #[test]
    fn test_empty_dataset_clears_rows() {
        let mut view = ProductsView::new();
        assert!(view.apply(Dataset::Products(vec![widget(1), widget(2)])));
        assert_eq!(view.len(), 2);
        assert!(view.apply(Dataset::Products(Vec::new())));
        assert!(view.is_empty());
        assert!(view.view().rows.is_empty());
    }

    #[test]
    fn test_foreign_dataset_is_ignored() {
        let mut view = ProductsView::new();
        view.apply(Dataset::Products(vec![widget(1)]));
        assert!(!view.apply(Dataset::Suppliers(Vec::new())));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_row_cells() {
        let cells = widget(7).cells();
        assert_eq!(cells[0], "7");
        assert_eq!(cells[4], "$9.5");
        assert_eq!(cells[6], "-");
    }

    #[test]
    fn test_stock_keys() {
        let mut view = ProductsView::new();
        let action = view.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE));
        assert_eq!(
            action,
            Action::Notify("Stock out modal - To be implemented".into(), ToastLevel::Info)
        );
        let action = view.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert_eq!(action, Action::Prompt(PromptKind::Category));
    }
}
