//! Stock-keeping unit identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Sku`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SkuError {
    /// The input string is empty or whitespace only.
    #[error("sku cannot be empty")]
    Empty,
}

/// A stock-keeping unit identifier.
///
/// SKUs are the unique key for a cart line and a catalog item. The value is
/// opaque to this library; the only structural requirement is that it is
/// non-empty.
///
/// ## Examples
///
/// ```
/// use shopfront_core::Sku;
///
/// assert!(Sku::parse("TSHIRT-BLUE-M").is_ok());
/// assert!(Sku::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Parse a `Sku` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or whitespace only.
    pub fn parse(s: &str) -> Result<Self, SkuError> {
        if s.trim().is_empty() {
            return Err(SkuError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Sku` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
