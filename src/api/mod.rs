//! API Module
//!
//! HTTP handlers and routing exposing the cache adapter as a REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a value
//! - `POST /add` - Store a value, optionally only if absent
//! - `GET /get/:key` - Retrieve a value by key
//! - `POST /get-multi` - Retrieve several values
//! - `GET /has/:key` - Check whether a key exists
//! - `DELETE /del/:key` - Delete a key
//! - `POST /del-multi` - Delete several keys
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
