//! Kind name → handler token conversion.
//!
//! Exception kinds are named in mixed case (`InvalidToken`, `Http404`).
//! Predefined handlers on an error model are keyed by the lowercase,
//! underscore-separated form of that name (`invalid_token`, `http404`).

use std::borrow::Cow;

/// Transform a mixed-case kind name into its handler token.
///
/// Returns `Cow::Borrowed` if the name is already a lowercase token.
/// Acronym runs stay together: `HTTPError` → `http_error`.
pub fn handler_token(name: &str) -> Cow<'_, str> {
    if !name.chars().any(|c| c.is_uppercase()) {
        return Cow::Borrowed(name);
    }

    let chars: Vec<char> = name.chars().collect();
    let mut token = String::with_capacity(name.len() + 4);

    for (index, &current) in chars.iter().enumerate() {
        if current.is_uppercase() {
            if index > 0 {
                let previous = chars[index - 1];
                let next_is_lower = chars.get(index + 1).is_some_and(|c| c.is_lowercase());
                let boundary = previous.is_lowercase()
                    || previous.is_ascii_digit()
                    || (previous.is_uppercase() && next_is_lower);
                if boundary && !token.ends_with('_') {
                    token.push('_');
                }
            }
            token.extend(current.to_lowercase());
        } else {
            token.push(current);
        }
    }

    Cow::Owned(token)
}
