use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Marker Tokenizer - Annotated Reply Lexing
// ============================================================================
// Assistant replies embed bracketed control tokens that switch parsing mode
// for the text that follows. The tokenizer turns a reply into an alternating
// stream of Marker and Text tokens; the command parser walks that stream
// with an explicit mode instead of string-splitting on regexes.

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(editarItem|removerItem|pedidoCancelado|itemNaoEncontrado)\]")
        .expect("marker regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    EditarItem,
    RemoverItem,
    PedidoCancelado,
    ItemNaoEncontrado,
}

impl Marker {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "editarItem" => Some(Marker::EditarItem),
            "removerItem" => Some(Marker::RemoverItem),
            "pedidoCancelado" => Some(Marker::PedidoCancelado),
            "itemNaoEncontrado" => Some(Marker::ItemNaoEncontrado),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Marker(Marker),
    Text(String),
}

/// Lex a reply into markers and the text segments between them.
///
/// Whitespace-only segments are dropped; everything else is preserved
/// verbatim so downstream extraction sees the original wording.
pub fn tokenize(reply: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for found in MARKER_RE.find_iter(reply) {
        let before = &reply[cursor..found.start()];
        if !before.trim().is_empty() {
            tokens.push(Token::Text(before.to_string()));
        }

        // find_iter only yields strings the alternation accepted, so the
        // name lookup cannot fail here.
        if let Some(marker) = Marker::from_name(&reply[found.start() + 1..found.end() - 1]) {
            tokens.push(Token::Marker(marker));
        }

        cursor = found.end();
    }

    let rest = &reply[cursor..];
    if !rest.trim().is_empty() {
        tokens.push(Token::Text(rest.to_string()));
    }

    tokens
}

/// Whether the reply contains any control marker at all. Decides between
/// marker-driven parsing and whole-text fallback extraction.
pub fn has_markers(reply: &str) -> bool {
    MARKER_RE.is_match(reply)
}

// ============================================================================
// Unit Tests
// ============================================================================
