//! Order payloads and the response projection.
//!
//! The write path uses typed serde structs; the read path projects a fixed
//! field set out of whatever document the store hands back. Unknown stored
//! fields are dropped, missing fields serialize as `null`, and a missing
//! `items` array becomes `[]`.

use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};

/// A single line item on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub name: String,
    pub quantity: i64,
    pub price: i64,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Create-order request body. A client-supplied `id` is accepted but never
/// used as the storage key; the store assigns its own `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    pub token: String,
    pub status: String,
    #[serde(rename = "type")]
    pub order_type: String,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Remaining")]
    pub remaining: String,
    pub items: Vec<OrderItemPayload>,
}

impl OrderPayload {
    /// Document to insert. The client `id` is dropped here.
    pub fn into_document(self) -> Result<Document, bson::ser::Error> {
        bson::to_document(&self)
    }
}

/// Partial update body: only the fields actually present in the request
/// make it into the `$set`. The storage key is never client-writable, so
/// there is no `id` field at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    pub token: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub table: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<String>,
    #[serde(rename = "Remaining")]
    pub remaining: Option<String>,
    pub items: Option<Vec<OrderItemPayload>>,
}

impl OrderUpdate {
    /// The present fields, shaped for a `$set`.
    pub fn set_document(&self) -> Result<Document, bson::ser::Error> {
        let mut set = Document::new();
        if let Some(token) = &self.token {
            set.insert("token", token);
        }
        if let Some(status) = &self.status {
            set.insert("status", status);
        }
        if let Some(order_type) = &self.order_type {
            set.insert("type", order_type);
        }
        if let Some(table) = &self.table {
            set.insert("table", table);
        }
        if let Some(amount) = &self.amount {
            set.insert("Amount", amount);
        }
        if let Some(remaining) = &self.remaining {
            set.insert("Remaining", remaining);
        }
        if let Some(items) = &self.items {
            set.insert("items", bson::to_bson(items)?);
        }
        Ok(set)
    }
}

/// Response shape for an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: String,
    pub token: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub table: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<String>,
    #[serde(rename = "Remaining")]
    pub remaining: Option<String>,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
    pub remarks: Option<String>,
}

impl OrderView {
    pub fn from_document(document: &Document) -> Self {
        let items = document
            .get_array("items")
            .map(|items| items.iter().map(OrderItemView::from_bson).collect())
            .unwrap_or_default();
        Self {
            id: id_string(document),
            token: get_string(document, "token"),
            status: get_string(document, "status"),
            order_type: get_string(document, "type"),
            table: get_string(document, "table"),
            amount: get_string(document, "Amount"),
            remaining: get_string(document, "Remaining"),
            items,
        }
    }
}

impl OrderItemView {
    fn from_bson(item: &Bson) -> Self {
        let empty = Document::new();
        let item = item.as_document().unwrap_or(&empty);
        Self {
            name: get_string(item, "name"),
            quantity: get_i64(item, "quantity"),
            price: get_i64(item, "price"),
            remarks: get_string(item, "remarks"),
        }
    }
}

/// `GET /orders` response body.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderView>,
    #[serde(rename = "newOrders")]
    pub new_orders: Vec<OrderView>,
}

impl OrdersResponse {
    /// `new_orders` is the subset still awaiting payment, by exact string
    /// match on the status tag. Order is preserved in both lists.
    pub fn from_views(orders: Vec<OrderView>) -> Self {
        let new_orders = orders
            .iter()
            .filter(|order| order.status.as_deref() == Some("Not Paid"))
            .cloned()
            .collect();
        Self { orders, new_orders }
    }
}

pub(crate) fn id_string(document: &Document) -> String {
    match document.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

pub(crate) fn get_string(document: &Document, key: &str) -> Option<String> {
    document
        .get(key)
        .and_then(Bson::as_str)
        .map(str::to_string)
}

pub(crate) fn get_i64(document: &Document, key: &str) -> Option<i64> {
    match document.get(key) {
        Some(Bson::Int32(value)) => Some(i64::from(*value)),
        Some(Bson::Int64(value)) => Some(*value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::doc;

    fn stored_order() -> Document {
        doc! {
            "_id": ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap(),
            "token": "ABC123",
            "status": "Not Paid",
            "type": "dine-in",
            "table": "4",
            "Amount": "250",
            "Remaining": "100",
            "items": [
                { "name": "Paneer Tikka", "quantity": 2_i32, "price": 120_i64, "remarks": "spicy" },
                { "name": "Lassi", "quantity": 1_i32, "price": 60_i32 },
            ],
        }
    }

    #[test]
    fn projection_copies_the_fixed_field_set() {
        let view = OrderView::from_document(&stored_order());
        assert_eq!(view.id, "507f1f77bcf86cd799439011");
        assert_eq!(view.token.as_deref(), Some("ABC123"));
        assert_eq!(view.status.as_deref(), Some("Not Paid"));
        assert_eq!(view.order_type.as_deref(), Some("dine-in"));
        assert_eq!(view.amount.as_deref(), Some("250"));
        assert_eq!(view.remaining.as_deref(), Some("100"));
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].name.as_deref(), Some("Paneer Tikka"));
        assert_eq!(view.items[0].quantity, Some(2));
        assert_eq!(view.items[1].price, Some(60));
    }

    #[test]
    fn unknown_stored_fields_never_leak() {
        let mut document = stored_order();
        document.insert("internal_flag", true);
        document.insert("audit", doc! { "by": "admin" });
        let view = OrderView::from_document(&document);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("internal_flag").is_none());
        assert!(json.get("audit").is_none());
    }

    #[test]
    fn missing_fields_serialize_as_null() {
        let document = doc! { "_id": ObjectId::new() };
        let view = OrderView::from_document(&document);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["token"].is_null());
        assert!(json["table"].is_null());
        assert_eq!(json["items"], serde_json::json!([]));
    }

    #[test]
    fn missing_remarks_serializes_as_null_not_error() {
        let view = OrderView::from_document(&stored_order());
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["items"][1]["remarks"].is_null());
    }

    #[test]
    fn item_order_is_preserved() {
        let view = OrderView::from_document(&stored_order());
        let names: Vec<_> = view
            .items
            .iter()
            .map(|item| item.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Paneer Tikka", "Lassi"]);
    }

    #[test]
    fn payload_document_drops_the_client_id() {
        let payload: OrderPayload = serde_json::from_value(serde_json::json!({
            "id": "client-supplied",
            "token": "T1",
            "status": "Not Paid",
            "type": "takeaway",
            "Amount": "90",
            "Remaining": "90",
            "items": [{ "name": "Tea", "quantity": 1, "price": 30 }],
        }))
        .unwrap();
        let document = payload.into_document().unwrap();
        assert!(!document.contains_key("id"));
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("token").unwrap(), "T1");
        // table was omitted by the client and is stored as null
        assert_eq!(document.get("table"), Some(&Bson::Null));
    }

    #[test]
    fn update_set_contains_exactly_the_present_fields() {
        let update: OrderUpdate =
            serde_json::from_value(serde_json::json!({ "status": "Paid" })).unwrap();
        let set = update.set_document().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("status").unwrap(), "Paid");
    }

    #[test]
    fn empty_update_produces_an_empty_set() {
        let update: OrderUpdate = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(update.set_document().unwrap().is_empty());
    }

    #[test]
    fn not_paid_partition_is_exact() {
        let documents = vec![
            doc! { "_id": ObjectId::new(), "token": "A", "status": "Not Paid" },
            doc! { "_id": ObjectId::new(), "token": "B", "status": "Paid" },
            doc! { "_id": ObjectId::new(), "token": "C", "status": "not paid" },
            doc! { "_id": ObjectId::new(), "token": "D", "status": "Not Paid" },
        ];
        let views: Vec<_> = documents.iter().map(OrderView::from_document).collect();
        let response = OrdersResponse::from_views(views);
        assert_eq!(response.orders.len(), 4);
        let new_tokens: Vec<_> = response
            .new_orders
            .iter()
            .map(|order| order.token.clone().unwrap())
            .collect();
        assert_eq!(new_tokens, vec!["A", "D"]);
    }
}
