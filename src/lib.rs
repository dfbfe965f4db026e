//! Stockdesk: a terminal admin dashboard for an inventory REST backend

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod forms;
pub mod infrastructure;
pub mod input;
pub mod logging;
pub mod notify;
pub mod renderers;
pub mod router;
pub mod session;
pub mod store;
pub mod ui;
