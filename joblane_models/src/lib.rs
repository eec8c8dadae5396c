use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;

pub mod job;
mod macros;
pub mod pagination;
pub mod user;

/// Shape of opaque record ids: a short token of letters, digits, `_` and `-`.
/// The uuid text form generated for new records is a subset of this shape.
pub static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_-]{1,64}$").unwrap());

/// Free-text filter input. Sanitized instead of validated: anything outside
/// letters, digits, whitespace and `-`/`.`/`,` is stripped and the result is
/// truncated to 100 characters, so construction never fails.
#[nutype(
    sanitize(with = sanitize_query_text),
    derive(Debug, Clone, PartialEq, Eq, Deref, From, Serialize, Deserialize),
)]
pub struct QueryText(String);

const QUERY_TEXT_MAX_CHARS: usize = 100;

fn sanitize_query_text(text: String) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '.' | ','))
        .take(QUERY_TEXT_MAX_CHARS)
        .collect()
}
