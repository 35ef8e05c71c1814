//! HTTP edge: session endpoints, gated pages, and request/response mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod cookie;
pub mod middleware;
pub mod token;
