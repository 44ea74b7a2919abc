use crate::model::block::Token;

/// Tokens written directly after the preceding text.
const ATTACHED: [&str; 9] = [".", ",", "-", ":", ";", "?", "!", "\"", "'"];

/// Joins tokens into one line.
///
/// Punctuation in `ATTACHED` sticks to what precedes it; every other token
/// is preceded by a single space, the first one included.
pub fn render(tokens: &[Token]) -> String {
	let mut line = String::new();
	for token in tokens {
		if !ATTACHED.contains(&token.as_str()) {
			line.push(' ');
		}
		line.push_str(token);
	}
	line
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<Token> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn punctuation_attaches_to_previous_word() {
		assert_eq!(render(&tokens("the cat , sat . a dog ran !")), " the cat, sat. a dog ran!");
	}

	#[test]
	fn other_symbols_keep_their_space() {
		assert_eq!(render(&tokens("wait ... ( no ) / yes")), " wait ... ( no ) / yes");
	}

	#[test]
	fn empty_stream_renders_empty() {
		assert_eq!(render(&[]), "");
	}
}
