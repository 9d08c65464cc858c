pub mod health;
pub mod order;
pub mod service;

pub use health::welcome;
pub use order::{
    create_order, delete_order, get_order, list_orders, search_orders, update_order,
};
pub use service::{create_service, get_service, list_services};
