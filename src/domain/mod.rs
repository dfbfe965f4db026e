//! Inventory domain models and queries
//!
//! This module defines the wire types exchanged with the inventory backend
//! and the queries the dashboard can issue, independent of the transport
//! (reqwest) and of the terminal rendering.

mod entities;
mod query;

pub use entities::{
    LoginResponse, Product, ProductRef, RegisterRequest, Role, Supplier, Transaction,
    TransactionType, User, UserRef,
};
pub use query::{Dataset, Query};
