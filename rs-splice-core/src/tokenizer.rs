//! Character scanner turning raw corpus text into tokens.
//!
//! The scanner is built from small [`Rule`]s tried in priority order after
//! skipping whitespace. The first rule that matches wins; when none
//! matches, tokenization stops with [`SpliceError::Tokenization`] instead of
//! silently dropping input.

use crate::error::{SpliceError, SpliceResult};
use crate::model::block::Token;

/// A scanning rule.
///
/// Returns the byte length of the token found at the start of `input`,
/// or `None` if the rule does not apply there.
pub type Rule = fn(&str) -> Option<usize>;

/// Rules in the order they are tried.
pub const RULES: [Rule; 3] = [dots, punctuation, word];

const PUNCTUATION: &[u8] = b",;:\"'-?()!/\\";

fn is_whitespace(byte: u8) -> bool {
	matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Byte length of the leading whitespace of `input`.
pub fn skip_whitespace(input: &str) -> usize {
	input.bytes().take_while(|b| is_whitespace(*b)).count()
}

/// Longest run of `.` characters.
pub fn dots(input: &str) -> Option<usize> {
	let len = input.bytes().take_while(|b| *b == b'.').count();
	(len > 0).then_some(len)
}

/// A single punctuation character.
pub fn punctuation(input: &str) -> Option<usize> {
	match input.as_bytes().first() {
		Some(b) if PUNCTUATION.contains(b) => Some(1),
		_ => None,
	}
}

/// Longest run of ASCII alphanumeric characters.
pub fn word(input: &str) -> Option<usize> {
	let len = input.bytes().take_while(u8::is_ascii_alphanumeric).count();
	(len > 0).then_some(len)
}

/// Splits `text` into lowercase tokens.
///
/// # Errors
/// Returns [`SpliceError::Tokenization`] with the byte offset of the first
/// character no rule accepts.
pub fn tokenize(text: &str) -> SpliceResult<Vec<Token>> {
	let mut tokens = Vec::new();
	let mut pos = 0;

	loop {
		pos += skip_whitespace(&text[pos..]);
		let rest = &text[pos..];
		if rest.is_empty() {
			break;
		}

		let len = RULES.iter().find_map(|rule| rule(rest));
		match len {
			Some(len) => {
				tokens.push(rest[..len].to_ascii_lowercase());
				pos += len;
			}
			None => {
				// Non-empty, so there is a next char
				let found = rest.chars().next().unwrap_or_default();
				return Err(SpliceError::Tokenization { offset: pos, found });
			}
		}
	}

	Ok(tokens)
}
