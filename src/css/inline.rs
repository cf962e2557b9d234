//! Inline style declarations: `"width: 10px; float: left"`.
//!
//! Quoted strings are lexed whole, so `:` and `;` inside them stay part of the
//! value. The first colon of a declaration separates name from value; later
//! colons belong to the value (`background: url(http://x)`).

use logos::Logos;

use crate::error::{Error, Result};

#[derive(Logos, Debug, Clone, PartialEq)]
enum Token {
    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// Everything else, whitespace included.
    #[regex(r#"[^:;"']+"#)]
    Text,
}

#[derive(Default)]
struct Declaration {
    name: String,
    value: String,
    has_colon: bool,
}

impl Declaration {
    fn push(&mut self, text: &str) {
        if self.has_colon {
            self.value.push_str(text);
        } else {
            self.name.push_str(text);
        }
    }

    fn finish(self, out: &mut Vec<(String, String)>) -> Result<()> {
        let name = self.name.trim();
        if !self.has_colon {
            if name.is_empty() {
                return Ok(());
            }
            return Err(Error::InvalidStyle(format!("`{name}` has no value")));
        }
        if name.is_empty() {
            return Err(Error::InvalidStyle(format!(
                "missing property name before `{}`",
                self.value.trim()
            )));
        }
        out.push((name.to_owned(), self.value.trim().to_owned()));
        Ok(())
    }
}

/// Parse `name: value` declarations separated by `;`.
///
/// Empty segments (`a: 1;; b: 2;`) are skipped. Names and values are trimmed.
pub fn parse_declarations(input: &str) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    let mut current = Declaration::default();

    for (result, span) in Token::lexer(input).spanned() {
        let token = result.map_err(|()| {
            Error::InvalidStyle(format!("unterminated quote at byte {}", span.start))
        })?;
        match token {
            Token::Colon if !current.has_colon => current.has_colon = true,
            Token::Semicolon => std::mem::take(&mut current).finish(&mut out)?,
            Token::Colon | Token::DoubleQuoted | Token::SingleQuoted | Token::Text => {
                current.push(&input[span]);
            }
        }
    }
    current.finish(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &str) -> Vec<(String, String)> {
        parse_declarations(input).unwrap()
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_owned(), v.to_owned())
    }

    #[test]
    fn simple_declarations() {
        assert_eq!(
            pairs("width: 10px; float:left"),
            vec![pair("width", "10px"), pair("float", "left")]
        );
    }

    #[test]
    fn trailing_and_empty_segments() {
        assert_eq!(
            pairs(" color : red ;; ; margin: 0 auto ;"),
            vec![pair("color", "red"), pair("margin", "0 auto")]
        );
        assert!(pairs("").is_empty());
        assert!(pairs("  ;  ").is_empty());
    }

    #[test]
    fn later_colons_stay_in_value() {
        assert_eq!(
            pairs("background: url(http://x/y.png)"),
            vec![pair("background", "url(http://x/y.png)")]
        );
    }

    #[test]
    fn quoted_values_keep_separators() {
        assert_eq!(
            pairs(r#"font-family: "A;B", 'C:D'; top: 0"#),
            vec![pair("font-family", r#""A;B", 'C:D'"#), pair("top", "0")]
        );
    }

    #[test]
    fn missing_colon_is_error() {
        assert!(matches!(
            parse_declarations("width 10px"),
            Err(Error::InvalidStyle(_))
        ));
    }

    #[test]
    fn missing_name_is_error() {
        assert!(matches!(
            parse_declarations(": 10px"),
            Err(Error::InvalidStyle(_))
        ));
    }

    #[test]
    fn unterminated_quote_is_error() {
        assert!(matches!(
            parse_declarations("content: \"open"),
            Err(Error::InvalidStyle(_))
        ));
    }
}
