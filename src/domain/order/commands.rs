use serde::{Deserialize, Serialize};

// ============================================================================
// Order Commands - Structured mutations extracted from assistant replies
// ============================================================================
// A reply is parsed into at most a handful of these; the reconciler applies
// them against the aggregate in the order they appeared in the text.

/// A single item with the absolute quantity the order should end up holding.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ItemQuantity {
    pub item_id: String,
    pub quantity: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderCommand {
    /// Set each listed item to the given quantity. Quantities are absolute,
    /// not deltas; an item absent from the order is inserted.
    Edit { items: Vec<ItemQuantity> },
    /// Delete the listed items from the order outright.
    Remove { item_ids: Vec<String> },
    /// Abandon the whole order.
    Cancel,
    /// The assistant flagged a request for something the menu does not carry.
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization_tags() {
        let cmd = OrderCommand::Edit {
            items: vec![ItemQuantity {
                item_id: "pastel".to_string(),
                quantity: 2,
            }],
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"kind\":\"edit\""));

        let cancel = serde_json::to_string(&OrderCommand::Cancel).unwrap();
        assert!(cancel.contains("\"kind\":\"cancel\""));
    }

    #[test]
    fn test_command_round_trip() {
        let cmd = OrderCommand::Remove {
            item_ids: vec!["coca-cola-lata".to_string()],
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: OrderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }
}
