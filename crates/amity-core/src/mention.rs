//! Extraction of email mentions from broadcast text.

use crate::{
  email::{self, Email},
  sets,
};

/// Characters stripped from the front of a token before validation. None of
/// them may start a local part. `'` may, so it is handled separately.
const LEADING_PUNCT: &[char] = &['(', '<', '[', '"'];

/// Characters stripped from the end of a token. A hostname always ends in an
/// alphanumeric, so none of these can belong to a valid address.
const TRAILING_PUNCT: &[char] = &[',', '.', ';', ':', '!', '?', ')', '>', ']', '"'];

/// Every valid address appearing as a whitespace-delimited token of `text`,
/// in first-seen order and without repeats.
///
/// ```
/// use amity_core::mention::mentions;
///
/// let found = mentions("hi bob@x.com, and (carol@y.org)!");
/// let found: Vec<&str> = found.iter().map(|e| e.as_str()).collect();
/// assert_eq!(found, ["bob@x.com", "carol@y.org"]);
/// ```
pub fn mentions(text: &str) -> Vec<Email> {
  sets::dedupe(
    text
      .split_whitespace()
      .map(strip_punctuation)
      .filter_map(|token| email::validate(token).ok()),
  )
}

/// Remove surrounding punctuation from a token. An apostrophe is only dropped
/// from the front when it also closes the token, as in `'bob@x.com'`.
fn strip_punctuation(token: &str) -> &str {
  let token = token
    .trim_start_matches(LEADING_PUNCT)
    .trim_end_matches(TRAILING_PUNCT);
  match token.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
    Some(quoted) => quoted.trim_end_matches(TRAILING_PUNCT),
    None => token.trim_end_matches('\''),
  }
}
