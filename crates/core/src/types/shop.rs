//! Shop identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ShopDomain`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopDomainError {
    /// The input string is empty.
    #[error("shop cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("shop must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or a control character.
    #[error("shop contains an invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// A merchant's store identifier.
///
/// Scopes every call to the translation server. Usually a
/// `*.myshopify.com` domain, but the server accepts any shop key, so the
/// suffix is not enforced.
///
/// ## Constraints
///
/// - Length: 1-255 characters
/// - No whitespace or control characters
///
/// ## Examples
///
/// ```
/// use imagelingo_core::ShopDomain;
///
/// assert!(ShopDomain::parse("demo.myshopify.com").is_ok());
/// assert!(ShopDomain::parse("x").is_ok());
///
/// assert!(ShopDomain::parse("").is_err());
/// assert!(ShopDomain::parse("my shop").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Maximum length of a shop domain (DNS name limit).
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `ShopDomain` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 255 characters,
    /// or contains whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, ShopDomainError> {
        if s.is_empty() {
            return Err(ShopDomainError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(ShopDomainError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(ShopDomainError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the shop as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ShopDomain` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::str::FromStr for ShopDomain {
    type Err = ShopDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShopDomain {
    type Error = ShopDomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ShopDomain> for String {
    fn from(shop: ShopDomain) -> Self {
        shop.into_inner()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let shop = ShopDomain::parse("demo.myshopify.com").unwrap();
        assert_eq!(shop.as_str(), "demo.myshopify.com");
        assert_eq!(shop.to_string(), "demo.myshopify.com");
    }

    #[test]
    fn test_parse_short_key() {
        assert!(ShopDomain::parse("x").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ShopDomain::parse(""), Err(ShopDomainError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(256);
        assert_eq!(
            ShopDomain::parse(&long),
            Err(ShopDomainError::TooLong { max: 255 })
        );
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            ShopDomain::parse("my shop"),
            Err(ShopDomainError::InvalidCharacter(' '))
        );
        assert!(ShopDomain::parse("shop\n").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let shop = ShopDomain::parse("demo.myshopify.com").unwrap();
        let json = serde_json::to_string(&shop).unwrap();
        assert_eq!(json, "\"demo.myshopify.com\"");

        let back: ShopDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shop);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<ShopDomain, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
