//! # Database Module
//!
//! PostgreSQL integration using tokio-postgres with a deadpool connection
//! pool. Includes connection management, record models, the user and post
//! stores, and schema migrations.

pub mod connection;
pub mod migrations;
pub mod models;
pub mod posts;
pub mod users;

pub use connection::{DatabaseConfig, DatabaseConnection};
pub use posts::PostStore;
pub use users::UserStore;
