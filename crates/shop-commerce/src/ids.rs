//! Newtype IDs for type-safe identifiers.
//!
//! Product ids are assigned by the remote catalog as integers. The newtype
//! keeps them from being confused with quantities, page numbers, or offsets.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A server-assigned product identifier.
///
/// Serializes as a bare integer, and as a string when used as a JSON object
/// key (the persisted cart mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a new ID from its numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| CommerceError::InvalidProductId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(123);
        assert_eq!(id.get(), 123);
    }

    #[test]
    fn test_id_from_str() {
        let id: ProductId = "456".parse().unwrap();
        assert_eq!(id, ProductId::new(456));
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", ProductId::new(789)), "789");
    }

    #[test]
    fn test_id_serializes_as_integer() {
        let json = serde_json::to_string(&ProductId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_id_as_map_key() {
        let mut map = HashMap::new();
        map.insert(ProductId::new(1), "phone");

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":"phone"}"#);

        let back: HashMap<ProductId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&ProductId::new(1)).map(String::as_str), Some("phone"));
    }
}
