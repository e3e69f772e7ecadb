//! Order record model.

use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value, json};

/// Item name to occurrence count, ordered by name.
pub type ItemCounts = BTreeMap<String, u32>;

/// Non-negative order number of any length.
///
/// Serialized as a plain JSON number with every digit preserved.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(BigUint);

impl OrderId {
    /// Parse a run of ASCII decimal digits. Leading zeros are allowed.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        BigUint::parse_bytes(digits.as_bytes(), 10).map(Self)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(BigUint::from(id))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for OrderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number: Number = self
            .0
            .to_string()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = Number::deserialize(deserializer)?;
        Self::from_digits(&number.to_string())
            .ok_or_else(|| D::Error::custom(format!("invalid order number: {}", number)))
    }
}

/// A validated order extracted from a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order number from the `Order #<digits>` marker.
    #[serde(rename = "Order No")]
    order_id: OrderId,

    /// Customer name, verbatim.
    #[serde(rename = "Customer")]
    customer: String,

    /// Frequency table of the item list.
    #[serde(rename = "Items")]
    items: ItemCounts,
}

impl Order {
    /// Create an order from already extracted fields.
    pub fn new(order_id: OrderId, customer: impl Into<String>, items: ItemCounts) -> Self {
        Self {
            order_id,
            customer: customer.into(),
            items,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn items(&self) -> &ItemCounts {
        &self.items
    }

    /// Key-value projection with the keys `Order No`, `Customer` and `Items`.
    pub fn to_structured(&self) -> Value {
        json!({
            "Order No": self.order_id,
            "Customer": self.customer,
            "Items": self.items,
        })
    }

    /// Human-readable single line form.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order #{} Customer: {} Items: {}",
            self.order_id,
            self.customer,
            format_items(&self.items)
        )
    }
}

/// Render an item table as `{"name": count, ...}` in key order.
pub fn format_items(items: &ItemCounts) -> String {
    let body = items
        .iter()
        .map(|(name, count)| format!("{:?}: {}", name, count))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HUGE: &str = "123456789012345678901234567890";

    fn sample() -> Order {
        let items = ItemCounts::from([("pen".to_string(), 2), ("ruler".to_string(), 1)]);
        Order::new(OrderId::from(7u64), "Alice", items)
    }

    #[test]
    fn test_to_structured_has_three_keys() {
        let value = sample().to_structured();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 3);
        assert_eq!(value["Order No"], json!(7));
        assert_eq!(value["Customer"], json!("Alice"));
        assert_eq!(value["Items"], json!({"pen": 2, "ruler": 1}));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(
            sample().to_text(),
            r#"Order #7 Customer: Alice Items: {"pen": 2, "ruler": 1}"#
        );
    }

    #[test]
    fn test_empty_item_name_renders_quoted() {
        let order = Order::new(OrderId::from(3u64), "Bob", ItemCounts::from([(String::new(), 1)]));
        assert_eq!(order.to_text(), r#"Order #3 Customer: Bob Items: {"": 1}"#);
    }

    #[test]
    fn test_serde_matches_structured_projection() {
        let order = sample();
        let serialized = serde_json::to_value(&order).unwrap();
        assert_eq!(serialized, order.to_structured());

        let back: Order = serde_json::from_value(serialized).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_order_id_from_digits() {
        assert_eq!(OrderId::from_digits("0042"), Some(OrderId::from(42u64)));
        assert_eq!(OrderId::from_digits(HUGE).unwrap().to_string(), HUGE);
        assert_eq!(OrderId::from_digits(""), None);
        assert_eq!(OrderId::from_digits("+1"), None);
        assert_eq!(OrderId::from_digits("1_000"), None);
    }

    #[test]
    fn test_large_order_id_keeps_every_digit() {
        let order = Order::new(OrderId::from_digits(HUGE).unwrap(), "Al", ItemCounts::from([("x".to_string(), 1)]));

        let json = serde_json::to_string(&order.to_structured()).unwrap();
        assert_eq!(json, format!(r#"{{"Customer":"Al","Items":{{"x":1}},"Order No":{}}}"#, HUGE));

        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back.order_id(), order.order_id());
        assert_eq!(order.to_text(), format!("Order #{} Customer: Al Items: {{\"x\": 1}}", HUGE));
    }

    #[test]
    fn test_order_id_rejects_negative_and_fractional_json() {
        assert!(serde_json::from_str::<OrderId>("-5").is_err());
        assert!(serde_json::from_str::<OrderId>("1.5").is_err());
        assert!(serde_json::from_str::<OrderId>("\"7\"").is_err());
    }
}
