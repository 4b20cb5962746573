use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::catalog::match_item;
use super::markers::{has_markers, tokenize, Marker, Token};
use super::quantity::find_quantity;
use crate::domain::menu::MenuItem;
use crate::domain::order::{ItemQuantity, OrderCommand};

// ============================================================================
// Command Parser - Annotated Reply to Structured Commands
// ============================================================================
// Three extraction paths, tried in order:
//   1. "Pedido atualizado:" listing shortcut - one Edit command from the
//      canonical listing block, bypassing markers entirely.
//   2. Marker-driven segments - an explicit mode machine over the token
//      stream; each text segment is parsed under the mode set by the most
//      recent marker.
//   3. Whole-text fallback - only when no marker is present at all.
// An empty return is reserved for replies with nothing order-related in
// them.

static SHORTCUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)pedido atualizado:").expect("shortcut regex is valid"));

static EDIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)alterado\s+(.+?)\s+para\s+(\d+)\s+unidades?").expect("edit regex is valid")
});

/// Parse an assistant reply into the commands it encodes.
pub fn parse_reply(reply: &str, catalog: &[MenuItem]) -> Vec<OrderCommand> {
    if let Some(found) = SHORTCUT_RE.find(reply) {
        let block = &reply[found.start()..];
        let items = extract_listing(block, catalog);
        if !items.is_empty() {
            debug!(items = items.len(), "parsed reply via listing shortcut");
            return vec![OrderCommand::Edit { items }];
        }
    }

    if has_markers(reply) {
        let commands = parse_marked_segments(reply, catalog);
        debug!(commands = commands.len(), "parsed reply via markers");
        return commands;
    }

    let items = extract_listing(reply, catalog);
    if items.is_empty() {
        debug!("reply carries no order content");
        Vec::new()
    } else {
        debug!(items = items.len(), "parsed reply via whole-text fallback");
        vec![OrderCommand::Edit { items }]
    }
}

/// Quantity extraction of every catalog item against one block of text.
fn extract_listing(block: &str, catalog: &[MenuItem]) -> Vec<ItemQuantity> {
    catalog
        .iter()
        .filter_map(|item| {
            let quantity = find_quantity(&item.name, block, false);
            if quantity > 0 {
                Some(ItemQuantity {
                    item_id: item.id.clone(),
                    quantity: quantity as u32,
                })
            } else {
                None
            }
        })
        .collect()
}

fn parse_marked_segments(reply: &str, catalog: &[MenuItem]) -> Vec<OrderCommand> {
    let mut commands = Vec::new();
    // Text before the first marker has no mode and is ignored.
    let mut mode: Option<Marker> = None;

    for token in tokenize(reply) {
        match token {
            Token::Marker(Marker::EditarItem) => mode = Some(Marker::EditarItem),
            Token::Marker(Marker::RemoverItem) => mode = Some(Marker::RemoverItem),
            Token::Marker(Marker::PedidoCancelado) => {
                commands.push(OrderCommand::Cancel);
                mode = None;
            }
            Token::Marker(Marker::ItemNaoEncontrado) => {
                commands.push(OrderCommand::NotFound);
                mode = None;
            }
            Token::Text(segment) => match mode {
                Some(Marker::EditarItem) => {
                    if let Some(command) = parse_edit_segment(&segment, catalog) {
                        commands.push(command);
                    }
                }
                Some(Marker::RemoverItem) => {
                    if let Some(command) = parse_remove_segment(&segment, catalog) {
                        commands.push(command);
                    }
                }
                _ => {}
            },
        }
    }

    commands
}

/// Recognize "Alterado <item> para <N> unidades" phrases in an edit segment.
/// Unresolvable names and unparseable quantities are skipped, and repeated
/// mentions of the same item keep the first value.
fn parse_edit_segment(segment: &str, catalog: &[MenuItem]) -> Option<OrderCommand> {
    let mut items: Vec<ItemQuantity> = Vec::new();

    for captures in EDIT_RE.captures_iter(segment) {
        let (Some(name), Some(raw_quantity)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let Some(item) = match_item(name.as_str(), catalog) else {
            debug!(candidate = name.as_str(), "edit phrase names no catalog item");
            continue;
        };
        let Ok(quantity) = raw_quantity.as_str().parse::<u32>() else {
            continue;
        };

        if !items.iter().any(|entry| entry.item_id == item.id) {
            items.push(ItemQuantity {
                item_id: item.id.clone(),
                quantity,
            });
        }
    }

    if items.is_empty() {
        None
    } else {
        Some(OrderCommand::Edit { items })
    }
}

/// Recognize "Removi (o|a) <item>" phrases in a remove segment, one probe
/// per catalog entry.
fn parse_remove_segment(segment: &str, catalog: &[MenuItem]) -> Option<OrderCommand> {
    let mut item_ids = Vec::new();

    for item in catalog {
        let pattern = format!(
            r"(?i)\bremovi\s+(?:o\s+|a\s+)?{}",
            regex::escape(&item.name)
        );
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        if re.is_match(segment) && !item_ids.contains(&item.id) {
            item_ids.push(item.id.clone());
        }
    }

    if item_ids.is_empty() {
        None
    } else {
        Some(OrderCommand::Remove { item_ids })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
