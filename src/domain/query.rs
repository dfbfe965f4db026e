//! Read queries issued by the renderers and the datasets they produce

use super::{Product, Supplier, Transaction, User};

/// A collection fetch against the inventory API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Products,
    SearchProducts(String),
    ProductsByCategory(String),
    Suppliers,
    SearchSuppliers(String),
    Transactions,
    Users,
    /// Fetches every user; the term is applied client-side
    SearchUsers(String),
}

impl Query {
    /// Whether this query reads the user collection (administrator only)
    pub fn touches_users(&self) -> bool {
        matches!(self, Query::Users | Query::SearchUsers(_))
    }

    /// Path segments and query pairs relative to the API base
    pub fn route(&self) -> (Vec<&str>, Vec<(&'static str, &str)>) {
        match self {
            Query::Products => (vec!["products"], vec![]),
            Query::SearchProducts(term) => {
                (vec!["products", "search"], vec![("name", term.as_str())])
            }
            Query::ProductsByCategory(category) => {
                (vec!["products", "category", category.as_str()], vec![])
            }
            Query::Suppliers => (vec!["suppliers"], vec![]),
            Query::SearchSuppliers(term) => {
                (vec!["suppliers", "search"], vec![("name", term.as_str())])
            }
            Query::Transactions => (vec!["transactions"], vec![]),
            Query::Users | Query::SearchUsers(_) => (vec!["users"], vec![]),
        }
    }

    /// Notification text when the query fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Query::Products => "Failed to load products",
            Query::Suppliers => "Failed to load suppliers",
            Query::Transactions => "Failed to load transactions",
            Query::Users => "Failed to load users",
            Query::SearchProducts(_) | Query::SearchSuppliers(_) | Query::SearchUsers(_) => {
                "Search failed"
            }
            Query::ProductsByCategory(_) => "Filter failed",
        }
    }
}

/// A freshly fetched collection, replacing whatever was shown before
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Products(Vec<Product>),
    Suppliers(Vec<Supplier>),
    Transactions(Vec<Transaction>),
    Users {
        users: Vec<User>,
        filter: Option<String>,
    },
}

impl Dataset {
    pub fn len(&self) -> usize {
        match self {
            Dataset::Products(rows) => rows.len(),
            Dataset::Suppliers(rows) => rows.len(),
            Dataset::Transactions(rows) => rows.len(),
            Dataset::Users { users, .. } => users.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
