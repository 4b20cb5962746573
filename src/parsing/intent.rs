use crate::domain::order::PaymentMethod;

// ============================================================================
// User Intent Signals - Keyword Detection on the Customer's Own Text
// ============================================================================
// Payment and confirmation detection scan ONLY what the customer typed.
// Assistant replies echo the payment options back when prompting, so
// scanning them would trigger false positives.

/// Payment keyword table, most specific key first. "cartão de crédito"
/// must be checked before the bare "crédito" so the card phrases resolve
/// to the right method; first containment hit wins.
const PAYMENT_KEYWORDS: &[(&str, PaymentMethod)] = &[
    ("cartão de crédito", PaymentMethod::CreditCard),
    ("cartao de credito", PaymentMethod::CreditCard),
    ("cartão de débito", PaymentMethod::DebitCard),
    ("cartao de debito", PaymentMethod::DebitCard),
    ("crédito", PaymentMethod::CreditCard),
    ("credito", PaymentMethod::CreditCard),
    ("débito", PaymentMethod::DebitCard),
    ("debito", PaymentMethod::DebitCard),
    ("credit", PaymentMethod::CreditCard),
    ("debit", PaymentMethod::DebitCard),
    ("dinheiro", PaymentMethod::Cash),
    ("cash", PaymentMethod::Cash),
    ("pix", PaymentMethod::Pix),
];

const CONFIRM_KEYWORDS: &[&str] = &[
    "confirmar",
    "confirmo",
    "confirma",
    "finalizar",
    "fechar pedido",
];

const NEW_ORDER_PHRASES: &[&str] = &[
    "novo pedido",
    "fazer um pedido",
    "quero pedir",
    "começar um pedido",
];

/// Substring containment bounded on both sides by non-alphanumeric text,
/// so "pix" never fires inside "pixel" or "cash" inside "cashback".
fn contains_keyword(text: &str, keyword: &str) -> bool {
    let mut from = 0;
    while let Some(found) = text[from..].find(keyword) {
        let start = from + found;
        let end = start + keyword.len();
        let free_before = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let free_after = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if free_before && free_after {
            return true;
        }
        from = end;
    }
    false
}

/// Detect a payment method in the customer's message, if any.
pub fn detect_payment(user_text: &str) -> Option<PaymentMethod> {
    let text = user_text.to_lowercase();
    PAYMENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains_keyword(&text, keyword))
        .map(|(_, method)| *method)
}

/// Whether the customer explicitly asked to close out the order.
pub fn wants_confirmation(user_text: &str) -> bool {
    let text = user_text.to_lowercase();
    CONFIRM_KEYWORDS
        .iter()
        .any(|keyword| contains_keyword(&text, keyword))
}

/// Whether the customer explicitly opened a new order.
pub fn starts_new_order(user_text: &str) -> bool {
    let text = user_text.to_lowercase();
    NEW_ORDER_PHRASES
        .iter()
        .any(|phrase| contains_keyword(&text, phrase))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_card_phrase_beats_bare_keyword() {
        assert_eq!(
            detect_payment("vou pagar no cartão de débito"),
            Some(PaymentMethod::DebitCard)
        );
        assert_eq!(
            detect_payment("cartao de credito por favor"),
            Some(PaymentMethod::CreditCard)
        );
    }

    #[test]
    fn test_bare_keywords() {
        assert_eq!(detect_payment("pago no pix"), Some(PaymentMethod::Pix));
        assert_eq!(detect_payment("Dinheiro"), Some(PaymentMethod::Cash));
        assert_eq!(detect_payment("no débito"), Some(PaymentMethod::DebitCard));
    }

    #[test]
    fn test_no_payment_keyword() {
        assert_eq!(detect_payment("quero 2 pastel"), None);
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        assert_eq!(detect_payment("curto arte em pixel"), None);
        assert_eq!(detect_payment("esse lanche dá cashback?"), None);
        assert_eq!(detect_payment("pago no pix!"), Some(PaymentMethod::Pix));
        assert!(!wants_confirmation("os outros já confirmaram"));
    }

    #[test]
    fn test_multiple_methods_resolve_by_table_order() {
        // "cartão de crédito" sits above "pix" in the table, so a message
        // naming both resolves to the card.
        assert_eq!(
            detect_payment("pode ser pix ou cartão de crédito?"),
            Some(PaymentMethod::CreditCard)
        );
    }

    #[test]
    fn test_confirmation_keywords() {
        assert!(wants_confirmation("pode confirmar"));
        assert!(wants_confirmation("CONFIRMO"));
        assert!(wants_confirmation("quero finalizar agora"));
        assert!(!wants_confirmation("quero 2 pastel"));
    }

    #[test]
    fn test_new_order_phrases() {
        assert!(starts_new_order("quero fazer um pedido"));
        assert!(starts_new_order("Novo pedido, por favor"));
        assert!(!starts_new_order("cadê meu pedido?"));
    }
}
