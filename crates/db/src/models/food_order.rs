//! Food order models and DTOs.

use pitboss_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Order statuses. `delivered` and `cancelled` are terminal.
pub mod statuses {
    pub const PENDING: &str = "pending";
    pub const PREPARING: &str = "preparing";
    pub const DELIVERED: &str = "delivered";
    pub const CANCELLED: &str = "cancelled";
}

/// A row from the `food_orders` table. `items` is a JSON array of
/// [`OrderItem`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FoodOrder {
    pub id: DbId,
    pub order_number: String,
    pub player_id: Option<DbId>,
    pub player_name: String,
    pub card_number: Option<String>,
    pub table_number: Option<i32>,
    pub seat_number: Option<i32>,
    pub items: serde_json::Value,
    pub status: String,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub handled_by: Option<DbId>,
}

/// One line item of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// DTO for placing an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub player_name: String,
    pub card_number: Option<String>,
    pub table_number: Option<i32>,
    pub seat_number: Option<i32>,
    pub items: Vec<OrderItem>,
}
