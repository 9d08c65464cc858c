use crate::store::{OrderStore, ServiceStore};

/// Shared gateway state. The stores are cheap clones of driver handles;
/// nothing here is mutable across requests.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderStore,
    pub services: ServiceStore,
}

impl AppState {
    pub fn new(orders: OrderStore, services: ServiceStore) -> Self {
        Self { orders, services }
    }
}
