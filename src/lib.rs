//! Dine-n-Shine backend
//!
//! A thin HTTP layer over two MongoDB collections (`orders` and `services`)
//! serving the restaurant-ordering front-end. Every endpoint is one request
//! mapped to at most two store calls: the operation itself, then a confirming
//! re-fetch. The handlers are stateless across requests.
//!
//! Module layout:
//! - [`config`]: yaml app config + env-supplied store credentials
//! - [`logging`]: tracing subscriber setup (rolling file + stdout)
//! - [`store`]: MongoDB access, identifier validation, per-collection stores
//! - [`gateway`]: router, CORS allow-list, request handlers, wire types

pub mod config;
pub mod gateway;
pub mod logging;
pub mod store;
