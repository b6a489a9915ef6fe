//! Persisted cart snapshot codec.
//!
//! The snapshot is a JSON array of line item records:
//!
//! ```json
//! [{"id":1,"name":"Traditional Dhaka Topi","price":15.99,"image":"images/products/dhaka-topi.jpg","quantity":2}]
//! ```
//!
//! Decoding validates every record against the line item invariants, the
//! one-item-per-product rule, and the requirement that every subtotal and the
//! running total fit in a `Decimal`. A snapshot with any bad record is rejected as a
//! whole; the store then falls back to an empty cart.

use nepali_shop_core::{CartState, LineItem, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// Wire shape of one persisted line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LineItemRecord {
    id: ProductId,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    image: String,
    quantity: i64,
}

impl From<&LineItem> for LineItemRecord {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            price: item.price(),
            image: item.image().to_string(),
            quantity: i64::from(item.quantity()),
        }
    }
}

impl LineItemRecord {
    fn into_line_item(self, index: usize) -> Result<LineItem, SnapshotError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| SnapshotError::InvalidRecord {
            index,
            reason: format!("quantity {} is out of range", self.quantity),
        })?;

        LineItem::new(self.id, self.name, self.price, self.image, quantity).map_err(|e| {
            SnapshotError::InvalidRecord {
                index,
                reason: e.to_string(),
            }
        })
    }
}

/// Serialize a cart to its persisted form.
///
/// # Errors
///
/// Returns `SnapshotError::Json` if serialization fails, which only happens
/// for prices outside the range of an `f64`.
pub fn encode(cart: &CartState) -> Result<String, SnapshotError> {
    let records: Vec<LineItemRecord> = cart.iter().map(LineItemRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse and validate a persisted snapshot.
///
/// # Errors
///
/// Returns `SnapshotError` if the payload is not an array of well-typed
/// records, a record breaks a line item invariant, the total overflows, or
/// two records share an ID.
pub fn decode(payload: &str) -> Result<CartState, SnapshotError> {
    let records: Vec<LineItemRecord> = serde_json::from_str(payload)?;

    let mut total = Decimal::ZERO;
    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let item = record.into_line_item(index)?;
        total = total
            .checked_add(item.subtotal())
            .ok_or_else(|| SnapshotError::InvalidRecord {
                index,
                reason: "cart total overflows".to_string(),
            })?;
        items.push(item);
    }
    Ok(CartState::try_from_items(items)?)
}
