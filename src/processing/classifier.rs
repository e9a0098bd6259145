//! Token classification into numbers and letters.
//!
//! Each token is tried as a number first, then as a single ASCII letter.
//! Anything else is dropped without error.

use serde::Serialize;

use crate::processing::primes::is_prime;
use crate::types::Token;

/// Exclusive upper bound of the `u64` range as an `f64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// A successfully parsed numeric token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericValue {
    /// Parsed value
    pub value: f64,
    /// Exact non-negative integer value, when the token has one
    pub integer: Option<u64>,
}

impl NumericValue {
    /// Parse a string token.
    ///
    /// Surrounding whitespace is ignored. Only finite decimal numbers are
    /// accepted, so `"NaN"`, `"inf"` and `""` are not numeric.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let value: f64 = trimmed.parse().ok()?;
        if !value.is_finite() {
            return None;
        }

        // Exact integer parse first so large values keep full precision
        let integer = match trimmed.parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) if trimmed.parse::<i128>().is_ok() => None,
            Err(_) => integral_u64(value),
        };

        Some(Self { value, integer })
    }

    /// Interpret a JSON number.
    pub fn from_json(number: &serde_json::Number) -> Option<Self> {
        if let Some(n) = number.as_u64() {
            return Some(Self {
                value: n as f64,
                integer: Some(n),
            });
        }
        if let Some(n) = number.as_i64() {
            return Some(Self {
                value: n as f64,
                integer: None,
            });
        }
        let value = number.as_f64().filter(|v| v.is_finite())?;
        Some(Self {
            value,
            integer: integral_u64(value),
        })
    }

    /// Whether this value takes part in the prime check and is prime.
    ///
    /// Non-integers are excluded rather than truncated.
    pub fn is_prime(&self) -> bool {
        self.integer.map_or(false, is_prime)
    }
}

fn integral_u64(value: f64) -> Option<u64> {
    if value >= 0.0 && value.fract() == 0.0 && value < U64_LIMIT {
        Some(value as u64)
    } else {
        None
    }
}

/// How a single token was classified.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenClass {
    Numeric(NumericValue),
    Alphabetic(char),
    Dropped,
}

/// Result of classifying a token list.
///
/// Both groups preserve input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Numeric tokens exactly as received
    pub numbers: Vec<Token>,
    /// Single-letter tokens
    pub alphabets: Vec<String>,
    /// Greatest lowercase letter among `alphabets`
    pub highest_lowercase: Option<char>,
    /// Whether any numeric token is prime
    pub prime_found: bool,
}

impl ClassificationResult {
    /// The highest lowercase letter as a zero- or one-element list.
    pub fn highest_lowercase_list(&self) -> Vec<String> {
        self.highest_lowercase
            .map(|c| vec![c.to_string()])
            .unwrap_or_default()
    }
}

/// Stateless token classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenClassifier;

impl TokenClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one token.
    pub fn classify_token(&self, token: &Token) -> TokenClass {
        match token {
            Token::Number(number) => NumericValue::from_json(number)
                .map(TokenClass::Numeric)
                .unwrap_or(TokenClass::Dropped),
            Token::Text(text) => {
                if let Some(numeric) = NumericValue::parse(text) {
                    return TokenClass::Numeric(numeric);
                }
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => TokenClass::Alphabetic(c),
                    _ => TokenClass::Dropped,
                }
            }
            Token::Other(_) => TokenClass::Dropped,
        }
    }

    /// Partition tokens into numbers and letters.
    pub fn classify(&self, tokens: &[Token]) -> ClassificationResult {
        let mut result = ClassificationResult::default();

        for token in tokens {
            match self.classify_token(token) {
                TokenClass::Numeric(numeric) => {
                    result.numbers.push(token.clone());
                    if !result.prime_found && numeric.is_prime() {
                        result.prime_found = true;
                    }
                }
                TokenClass::Alphabetic(c) => {
                    result.alphabets.push(c.to_string());
                    if c.is_ascii_lowercase() && result.highest_lowercase.map_or(true, |h| c > h) {
                        result.highest_lowercase = Some(c);
                    }
                }
                TokenClass::Dropped => {}
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tokens(values: &[&str]) -> Vec<Token> {
        values.iter().map(|s| Token::text(*s)).collect()
    }

    #[test]
    fn test_mixed_scenario() {
        let input = tokens(&["a", "b", "34", "-1", "z", "$", "3"]);
        let result = TokenClassifier::new().classify(&input);

        assert_eq!(result.numbers, tokens(&["34", "-1", "3"]));
        assert_eq!(result.alphabets, vec!["a", "b", "z"]);
        assert_eq!(result.highest_lowercase, Some('z'));
        assert!(result.prime_found);
    }

    #[test]
    fn test_empty_input() {
        let result = TokenClassifier::new().classify(&[]);
        assert_eq!(result, ClassificationResult::default());
        assert!(result.highest_lowercase_list().is_empty());
    }

    #[test]
    fn test_every_token_lands_in_exactly_one_group() {
        let input = tokens(&["1", "x", "xy", "", " ", "B", "2.5", "#", "NaN", "inf", "7"]);
        let classifier = TokenClassifier::new();
        let result = classifier.classify(&input);
        let dropped = input
            .iter()
            .filter(|t| classifier.classify_token(t) == TokenClass::Dropped)
            .count();

        assert_eq!(result.numbers, tokens(&["1", "2.5", "7"]));
        assert_eq!(result.alphabets, vec!["x", "B"]);
        assert_eq!(result.numbers.len() + result.alphabets.len() + dropped, input.len());
    }

    #[test]
    fn test_highest_lowercase_ignores_uppercase() {
        let result = TokenClassifier::new().classify(&tokens(&["Z", "A", "c", "b"]));
        assert_eq!(result.highest_lowercase, Some('c'));
        assert_eq!(result.highest_lowercase_list(), vec!["c".to_string()]);

        let upper_only = TokenClassifier::new().classify(&tokens(&["Z", "Y"]));
        assert_eq!(upper_only.highest_lowercase, None);
    }

    #[test]
    fn test_prime_detection() {
        let classifier = TokenClassifier::new();
        for prime in ["2", "3", "5", "7", "11", " 13 ", "7.0", "+17"] {
            assert!(classifier.classify(&tokens(&[prime])).prime_found, "{:?}", prime);
        }
        for non_prime in ["0", "1", "4", "9", "10", "-7", "-2", "7.5", "3.1"] {
            assert!(!classifier.classify(&tokens(&[non_prime])).prime_found, "{:?}", non_prime);
        }
    }

    #[test]
    fn test_numeric_parse_keeps_original_text() {
        let result = TokenClassifier::new().classify(&tokens(&["007", " 42", "1e3"]));
        assert_eq!(result.numbers, tokens(&["007", " 42", "1e3"]));
        assert!(result.prime_found, "007 is the prime 7");
    }

    #[test]
    fn test_json_numbers() {
        let input: Vec<Token> = serde_json::from_value(json!([4, 6, "q", 2.0, -3])).unwrap();
        let result = TokenClassifier::new().classify(&input);
        assert_eq!(serde_json::to_value(&result.numbers).unwrap(), json!([4, 6, 2.0, -3]));
        assert!(result.prime_found);
    }

    #[test]
    fn test_non_string_values_dropped() {
        let input: Vec<Token> = serde_json::from_value(json!([true, null, ["a"], {"k": 1}])).unwrap();
        let result = TokenClassifier::new().classify(&input);
        assert!(result.numbers.is_empty());
        assert!(result.alphabets.is_empty());
    }

    #[test]
    fn test_numeric_value_parse() {
        assert_eq!(NumericValue::parse("13").unwrap().integer, Some(13));
        assert_eq!(NumericValue::parse("-4").unwrap().integer, None);
        assert_eq!(NumericValue::parse("2.5").unwrap().integer, None);
        assert_eq!(
            NumericValue::parse("18446744073709551557").unwrap().integer,
            Some(18_446_744_073_709_551_557)
        );
        assert_eq!(NumericValue::parse("99999999999999999999999").unwrap().integer, None);
        assert!(NumericValue::parse("0x10").is_none());
        assert!(NumericValue::parse("infinity").is_none());
        assert!(NumericValue::parse("1e400").is_none());
    }
}
