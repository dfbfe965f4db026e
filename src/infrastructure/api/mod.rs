//! Inventory REST API gateway

mod client;
mod error;

pub use client::{merge_headers, ApiClient, InventoryApi, RequestOptions};
pub use error::ApiError;
