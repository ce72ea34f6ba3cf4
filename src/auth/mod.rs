//! # Authentication Module
//!
//! Handles password hashing, session token issuance and validation, and the
//! middleware that verifies the session cookie on protected endpoints.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
