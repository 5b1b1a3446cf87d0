//! Bistro Core - Restaurant Ordering Backend
//!
//! This crate provides the REST API for the Bistro ordering application:
//! menu and cart CRUD over a document store, bearer-token access control,
//! card payment-intent creation and order-confirmation email.

pub mod api;
pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod repository;
pub mod server;
pub mod stripe;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
