//! Entities as returned by the inventory REST API

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// User role. Only `Admin` unlocks user management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Staff,
    Manager,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Staff, Role::Manager, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "STAFF",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a successful `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: f64,
    pub qty: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Movement type. Unknown wire values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    StockIn,
    StockOut,
    Purchase,
    Sale,
    Return,
    Adjustment,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::StockIn => "STOCK_IN",
            TransactionType::StockOut => "STOCK_OUT",
            TransactionType::Purchase => "PURCHASE",
            TransactionType::Sale => "SALE",
            TransactionType::Return => "RETURN",
            TransactionType::Adjustment => "ADJUSTMENT",
            TransactionType::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "STOCK_IN" => TransactionType::StockIn,
            "STOCK_OUT" => TransactionType::StockOut,
            "PURCHASE" => TransactionType::Purchase,
            "SALE" => TransactionType::Sale,
            "RETURN" => TransactionType::Return,
            "ADJUSTMENT" => TransactionType::Adjustment,
            _ => TransactionType::Other(raw),
        }
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Product reference nested inside a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// User reference nested inside a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub product: ProductRef,
    pub qty: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: String,
    pub user: UserRef,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub lot_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Transaction {
    /// Date as `YYYY-MM-DD HH:MM:SS`, or the raw string when it is not ISO-8601
    pub fn display_date(&self) -> String {
        let raw = self.date.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .or_else(|_| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .map(|dt| dt.naive_local().format("%Y-%m-%d %H:%M:%S").to_string())
            })
            .unwrap_or_else(|_| raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
}
