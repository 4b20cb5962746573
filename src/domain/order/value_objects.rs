use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================
// Small owned types shared by the aggregate, the reconciler and the ports.
// They carry no behavior beyond derived totals and label conversions.

/// One item-and-quantity entry inside an order.
///
/// Invariant: `quantity > 0`. A line that would reach zero is deleted by the
/// aggregate, never stored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderLine {
    pub item_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Payment method labels follow the conversation contract used upstream;
/// `Indefinido` is the placeholder before the customer picked one.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Pix,
    Indefinido,
}

impl PaymentMethod {
    /// Whether this method can back a confirmed order.
    pub fn is_valid(&self) -> bool {
        !matches!(self, PaymentMethod::Indefinido)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Indefinido => "INDEFINIDO",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

// ============================================================================
// Unit Tests
// ============================================================================
