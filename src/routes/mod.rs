// # Routes Module
//
// - This module contains all HTTP route handlers for the blog server.
// - Routes are organized by functionality into separate submodules.
//
//  ## Available Route Modules
// - `health`: Health check endpoint
// - `auth`: Registration, login, logout, and session info
// - `posts`: Post CRUD and file upload

/// Health check endpoint
pub mod health;

/// Registration, login, logout, and session info endpoints
pub mod auth;

/// Post CRUD endpoints
pub mod posts;
