//! # Order Store
//!
//! In-memory order status map shared by all request handlers.
//! Nothing is persisted; the map lives as long as the process.

use crate::order::Order;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cloneable handle to the order map.
///
/// Each identifier maps to at most one order; the last write wins.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single order
    pub async fn get(&self, uuid: &str) -> Option<Order> {
        self.orders.read().await.get(uuid).cloned()
    }

    /// Insert or overwrite an order, returning the previous entry
    pub async fn set(&self, order: Order) -> Option<Order> {
        let mut orders = self.orders.write().await;
        orders.insert(order.uuid.clone(), order)
    }

    /// Record a status change for `uuid`
    pub async fn upsert_status(&self, uuid: &str, status: &str) -> Option<Order> {
        self.set(Order::new(uuid, status)).await
    }

    /// Consistent copy of every order, keyed by identifier
    pub async fn snapshot(&self) -> BTreeMap<String, Order> {
        let orders = self.orders.read().await;
        orders
            .iter()
            .map(|(uuid, order)| (uuid.clone(), order.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}
