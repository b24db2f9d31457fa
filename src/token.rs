use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};

/// An opaque bearer credential handed out by the server on login.
///
/// The `Debug` impl never prints the secret, so sessions can be logged
/// freely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new<S: Into<String>>(raw: S) -> Self { Token(raw.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_empty(&self) -> bool { self.0.trim().is_empty() }
}

impl From<String> for Token {
    fn from(other: String) -> Token { Token(other) }
}

impl From<&str> for Token {
    fn from(other: &str) -> Token { Token::new(other) }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_secret() {
        let token = Token::new("eyJhbGciOiJIUzI1NiJ9.super-secret");

        let got = format!("{:?}", token);

        assert_eq!(got, "Token(\"<redacted>\")");
    }

    #[test]
    fn whitespace_only_tokens_are_empty() {
        assert!(Token::new("  ").is_empty());
        assert!(!Token::new("T").is_empty());
    }
}
