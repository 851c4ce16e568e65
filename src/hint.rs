//! "Did you mean" hints for untranslated lines.

use edit_distance::edit_distance;

use crate::token::{SourceLine, Token};

/// Words that start a line the translator can handle.
const KNOWN_WORDS: &[&str] = &["int", "return", "scanf", "printf"];

/// Suggests a supported keyword or function for a line whose first word looks like a typo of
/// one. Short words need to be within one edit, longer ones within two.
pub fn suggest(line: &SourceLine) -> Option<&'static str> {
    let word = match line.tokens.first() {
        Some((Token::Identifier(word), _)) => *word,
        _ => return None,
    };

    if word.len() < 3 {
        return None;
    }

    KNOWN_WORDS.iter()
        .map(|known| (*known, edit_distance(word, known)))
        .filter(|(known, distance)| match *distance {
            0 => false,
            1 => true,
            2 => known.len() >= 5,
            _ => false,
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(known, _)| known)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggest_for(raw: &str) -> Option<&'static str> {
        suggest(&SourceLine::lex(raw).unwrap())
    }

    #[test]
    fn test_typos() {
        assert_eq!(suggest_for(r#"prinf("%d", x);"#), Some("printf"));
        assert_eq!(suggest_for("retrun x;"), Some("return"));
        assert_eq!(suggest_for("itn x;"), None);
        assert_eq!(suggest_for("Int x;"), Some("int"));
    }

    #[test]
    fn test_no_hint() {
        assert_eq!(suggest_for("for (i = 2; i <= n; i++) {"), None);
        assert_eq!(suggest_for("if (x) {"), None);
        assert_eq!(suggest_for("}"), None);
        assert_eq!(suggest_for("printf;"), None);
    }
}
