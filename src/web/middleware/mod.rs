//! Middleware for the web server.

pub mod security;

pub use security::security_headers;
