//! Gateway wire types.
//!
//! ## Input types
//! - [`OrderPayload`] / [`ServicePayload`]: create request bodies
//! - [`OrderUpdate`]: partial update body (present fields only)
//!
//! ## Output types
//! - [`OrderView`] / [`ServiceView`]: fixed field projections of stored
//!   documents
//! - [`ApiError`]: `{"detail": ...}` failure body with status code

pub mod order;
pub mod response;
pub mod service;

pub use order::{
    OrderItemPayload, OrderItemView, OrderPayload, OrderUpdate, OrderView, OrdersResponse,
};
pub use response::{ApiError, ApiResult, DeleteResponse, ok};
pub use service::{ServicePayload, ServiceView, ServicesResponse};
