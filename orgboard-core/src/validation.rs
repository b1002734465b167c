//! Regole di validazione dei campi di un messaggio, identiche per create e update.

use crate::error::ValidationErrors;
use crate::protocol::http::MessageRequest;

pub const TITLE_FIELD: &str = "Title";
pub const CONTENT_FIELD: &str = "Content";
pub const IS_ACTIVE_FIELD: &str = "IsActive";

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 200;
pub const CONTENT_MIN: usize = 10;
pub const CONTENT_MAX: usize = 1000;

pub const TITLE_ERROR: &str = "Title is required and must be between 3 and 200 characters";
pub const CONTENT_ERROR: &str = "Content must be between 10 and 1000 characters";
pub const TITLE_CONFLICT: &str = "Title must be unique per organization";
pub const UPDATE_INACTIVE_ERROR: &str = "Cannot update inactive message";
pub const DELETE_INACTIVE_ERROR: &str = "Cannot delete inactive message";

/// Vero se `value` non è vuoto/solo spazi e la sua lunghezza sta in `[min, max]`.
/// La lunghezza è in unità UTF-16: un emoji fuori dal BMP conta 2.
fn within_bounds(value: &str, min: usize, max: usize) -> bool {
    if value.trim().is_empty() {
        return false;
    }
    let len = value.encode_utf16().count();
    (min..=max).contains(&len)
}

/// Checks title and content independently; an empty map means the payload is valid.
pub fn validate(request: &MessageRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if !within_bounds(&request.title, TITLE_MIN, TITLE_MAX) {
        errors.add(TITLE_FIELD, TITLE_ERROR);
    }
    if !within_bounds(&request.content, CONTENT_MIN, CONTENT_MAX) {
        errors.add(CONTENT_FIELD, CONTENT_ERROR);
    }
    errors
}

// maiuscola semplice, carattere per carattere: le espansioni (ß -> SS) lasciano il carattere invariato
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Confronto case-insensitive ordinale dei titoli usato da tutti i repository.
/// Ogni carattere è confrontato con la sua maiuscola semplice, senza normalizzazioni:
/// il segno Kelvin (U+212A) resta diverso da "k".
pub fn titles_match(a: &str, b: &str) -> bool {
    a == b || a.chars().map(fold_char).eq(b.chars().map(fold_char))
}
