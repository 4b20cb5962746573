use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// ============================================================================
// Quantity Extractor - Prioritized Pattern Cascade
// ============================================================================
// Finds the integer quantity a text span associates with one item name. The
// matchers run in a fixed order and the first one that yields a parseable
// integer is authoritative; later matchers are never consulted. When a text
// satisfies several patterns with different values, that ordering IS the
// ambiguity-resolution rule.

type MatcherFn = fn(&str, &str) -> Option<u32>;

/// Ordered matcher table. Each entry is (name, matcher); the name shows up
/// in debug logs so a surprising extraction can be traced to its pattern.
const MATCHERS: &[(&str, MatcherFn)] = &[
    ("unit_listing", unit_listing),
    ("number_before_item", number_before_item),
    ("item_then_number", item_then_number),
    ("keyword_mais", keyword_mais),
    ("keyword_adicionar", keyword_adicionar),
    ("keyword_quero", keyword_quero),
    ("keyword_pedir", keyword_pedir),
    ("colon_quantity", colon_quantity),
    ("number_anywhere", number_anywhere),
];

/// Find the quantity `text` associates with `item_name`.
///
/// Returns 0 when no pattern matches. With `is_removal_context` the
/// magnitude is negated: positive means an absolute/added quantity,
/// negative means "reduce by that much".
pub fn find_quantity(item_name: &str, text: &str, is_removal_context: bool) -> i64 {
    let item = regex::escape(item_name.trim());
    if item.is_empty() {
        return 0;
    }

    for &(name, matcher) in MATCHERS {
        if let Some(quantity) = matcher(&item, text) {
            debug!(
                matcher = name,
                item = item_name,
                quantity,
                "quantity pattern matched"
            );
            let signed = quantity as i64;
            return if is_removal_context { -signed } else { signed };
        }
    }

    0
}

// Item-interpolated patterns cannot be per-pattern statics, so compiled
// regexes are cached by pattern string instead.
static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Run `pattern` against `text` and parse capture group 1 as a quantity.
/// A number too large for u32 counts as "no match" so the cascade moves on.
fn capture_quantity(pattern: &str, text: &str) -> Option<u32> {
    let re = {
        let mut cache = PATTERN_CACHE
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache
            .entry(pattern.to_string())
            .or_insert_with(|| {
                // Item names are escaped before interpolation, so the
                // pattern templates are the only thing that could break.
                Regex::new(pattern).expect("quantity pattern is valid")
            })
            .clone()
    };
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

// The canonical listing format the assistant is instructed to emit:
// "<item> (N unidades)".
fn unit_listing(item: &str, text: &str) -> Option<u32> {
    capture_quantity(
        &format!(r"(?i){}\s*\(\s*(\d+)\s*unidades?\s*\)", item),
        text,
    )
}

// A bare integer immediately before the item name, optionally "N x <item>".
fn number_before_item(item: &str, text: &str) -> Option<u32> {
    capture_quantity(&format!(r"(?i)\b(\d+)\s*(?:x\s*)?{}", item), text)
}

// The item name immediately followed by an integer, optionally "<item> x N".
fn item_then_number(item: &str, text: &str) -> Option<u32> {
    capture_quantity(&format!(r"(?i){}\s*(?:x\s*)?(\d+)\b", item), text)
}

// Looser contextual triggers. These tolerate a few words between the number
// and the item as long as no other digit intervenes.
fn keyword_mais(item: &str, text: &str) -> Option<u32> {
    capture_quantity(&format!(r"(?i)\bmais\s+(\d+)\b[^\d\n]*{}", item), text)
}

fn keyword_adicionar(item: &str, text: &str) -> Option<u32> {
    capture_quantity(&format!(r"(?i)\badicionar?\s+(\d+)\b[^\d\n]*{}", item), text)
}

fn keyword_quero(item: &str, text: &str) -> Option<u32> {
    capture_quantity(&format!(r"(?i)\bquero\s+(\d+)\b[^\d\n]*{}", item), text)
}

fn keyword_pedir(item: &str, text: &str) -> Option<u32> {
    capture_quantity(&format!(r"(?i)\bpedir\s+(\d+)\b[^\d\n]*{}", item), text)
}

// "<item>: N" as seen in enumerated confirmations.
fn colon_quantity(item: &str, text: &str) -> Option<u32> {
    capture_quantity(&format!(r"(?i){}\s*:\s*(\d+)\b", item), text)
}

// Last resort: any integer somewhere before the item name on the same line.
fn number_anywhere(item: &str, text: &str) -> Option<u32> {
    capture_quantity(&format!(r"(?i)\b(\d+)\b[^\d\n]*{}", item), text)
}

// ============================================================================
// Unit Tests
// ============================================================================
