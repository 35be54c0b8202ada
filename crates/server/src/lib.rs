//! A starter template for an axum web service.
//!
//! The service wires CORS and request logging middleware, a SeaORM account
//! model with migrations, and a health check endpoint whose detailed variant
//! runs a small asynchronous counting demonstration.

pub mod api;
pub mod config;
pub mod counting;
pub mod database;
pub mod entity;
pub mod error;
pub mod logging;
pub mod middleware;
