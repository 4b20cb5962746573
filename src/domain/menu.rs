use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Menu Catalog Entry
// ============================================================================
//
// Catalog items are sourced externally and read-only within this engine.
// Unit price feeds line pricing; stock feeds the inventory check applied
// before any quantity increase is committed.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub stock: u32,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Decimal, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_serialization() {
        let item = MenuItem::new("pastel", "Pastel de Carne", Decimal::new(850, 2), 40);

        let json = serde_json::to_string(&item).unwrap();
        let deserialized: MenuItem = serde_json::from_str(&json).unwrap();

        assert_eq!(item, deserialized);
        assert_eq!(deserialized.unit_price, Decimal::new(850, 2));
    }
}
