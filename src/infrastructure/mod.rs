//! Infrastructure layer - external service integrations
//!
//! This layer contains:
//! - the reqwest gateway to the inventory REST API
//! - the Tokio runtime bridge that runs requests off the UI thread

pub mod api;
pub mod runtime;

pub use api::{ApiClient, ApiError, InventoryApi};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
