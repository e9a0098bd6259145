//! Input token definitions.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

/// One element of the `data` list, kept exactly as the client sent it.
///
/// Clients mostly send strings, but JSON numbers are accepted as well and are
/// echoed back in their original form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    /// A JSON number
    Number(serde_json::Number),
    /// A JSON string
    Text(String),
    /// Any other JSON value; never classified
    Other(serde_json::Value),
}

impl Token {
    /// Create a text token.
    pub fn text(s: impl Into<String>) -> Self {
        Token::Text(s.into())
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Text(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Text(s)
    }
}

impl From<i64> for Token {
    fn from(n: i64) -> Self {
        Token::Number(n.into())
    }
}

/// Parse a single JSON value as a token.
///
/// Numbers beyond the `f64` range cannot be held by `serde_json::Number`; they
/// become `Token::Other(Null)` so the rest of the list is still classified.
fn parse_token(raw: &RawValue) -> Token {
    serde_json::from_str(raw.get()).unwrap_or(Token::Other(Value::Null))
}

/// Parse a JSON array element by element.
fn parse_token_list(text: &str) -> Option<Vec<Token>> {
    let elements: Vec<Box<RawValue>> = serde_json::from_str(text).ok()?;
    Some(elements.iter().map(|raw| parse_token(raw)).collect())
}

/// Flatten the `data` field of a JSON body into tokens.
///
/// An array yields its elements and a string expands like a form field.
/// Any other value is a single token.
pub fn tokens_from_data(raw: &RawValue) -> Vec<Token> {
    if let Some(tokens) = parse_token_list(raw.get()) {
        return tokens;
    }
    match parse_token(raw) {
        Token::Text(text) => decode_data_text(text),
        Token::Other(Value::Null) => Vec::new(),
        token => vec![token],
    }
}

/// Expand the text of a `data` form field.
///
/// Text holding a JSON array expands to that array; any other text is a
/// single token.
pub fn decode_data_text(raw: String) -> Vec<Token> {
    if raw.trim_start().starts_with('[') {
        if let Some(tokens) = parse_token_list(&raw) {
            return tokens;
        }
    }
    vec![Token::Text(raw)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_deserialization() {
        let tokens: Vec<Token> = serde_json::from_value(json!(["a", 7, 2.5, true, null])).unwrap();
        assert_eq!(tokens[0], Token::text("a"));
        assert_eq!(tokens[1], Token::from(7));
        assert!(matches!(tokens[2], Token::Number(_)));
        assert_eq!(tokens[3], Token::Other(json!(true)));
        assert_eq!(tokens[4], Token::Other(json!(null)));
    }

    #[test]
    fn test_serialization_keeps_original_form() {
        let tokens = vec![Token::text("34"), Token::from(3)];
        assert_eq!(serde_json::to_value(&tokens).unwrap(), json!(["34", 3]));
    }

    fn data(text: &str) -> Vec<Token> {
        let raw: Box<RawValue> = serde_json::from_str(text).unwrap();
        tokens_from_data(&raw)
    }

    #[test]
    fn test_data_field_variants() {
        assert_eq!(data(r#"["a", "1"]"#), vec![Token::text("a"), Token::text("1")]);
        assert_eq!(data(r#""[\"b\", 2]""#), vec![Token::text("b"), Token::from(2)]);
        assert_eq!(data(r#""z""#), vec![Token::text("z")]);
        assert_eq!(data("5"), vec![Token::from(5)]);
    }

    #[test]
    fn test_out_of_range_number_keeps_the_rest() {
        let tokens = data(r#"["a", 1e400, "3"]"#);
        assert_eq!(tokens, vec![Token::text("a"), Token::Other(Value::Null), Token::text("3")]);

        let encoded = decode_data_text("[-1e999, 2]".to_string());
        assert_eq!(encoded, vec![Token::Other(Value::Null), Token::from(2)]);
    }

    #[test]
    fn test_malformed_array_text_is_one_token() {
        assert_eq!(decode_data_text("[oops".to_string()), vec![Token::text("[oops")]);
    }
}
