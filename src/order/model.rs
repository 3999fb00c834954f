//! Order record.

use serde::{Deserialize, Serialize};

/// An order row. `id` is `None` until the order has been saved once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<i64>,
    pub order_number: String,
}

impl Order {
    /// An unsaved order; the repository assigns the id.
    pub fn new(order_number: impl Into<String>) -> Self {
        Self {
            id: None,
            order_number: order_number.into(),
        }
    }
}
