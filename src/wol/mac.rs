//! Hardware address parsing for the wake target.

use regex::Regex;
use std::{fmt, str::FromStr};
use thiserror::Error;

const MAC_PATTERN: &str = r"^(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$|^[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}$|^[0-9A-Fa-f]{12}$";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MacAddressError {
    #[error("empty MAC address")]
    Empty,
    #[error("invalid MAC address format: {0}")]
    Format(String),
}

/// A 48-bit link-layer address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Parse `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff`, `aabb.ccdd.eeff` or
    /// `aabbccddeeff` (case-insensitive).
    ///
    /// # Errors
    /// Returns an error if the input is empty or not one of the accepted notations.
    pub fn parse(input: &str) -> Result<Self, MacAddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MacAddressError::Empty);
        }

        let matches = Regex::new(MAC_PATTERN).is_ok_and(|re| re.is_match(trimmed));
        if !matches {
            return Err(MacAddressError::Format(trimmed.to_string()));
        }

        let digits: String = trimmed.chars().filter(char::is_ascii_hexdigit).collect();
        let mut octets = [0u8; 6];
        for (index, octet) in octets.iter_mut().enumerate() {
            let pair = digits
                .get(index * 2..index * 2 + 2)
                .ok_or_else(|| MacAddressError::Format(trimmed.to_string()))?;
            *octet = u8::from_str_radix(pair, 16)
                .map_err(|_| MacAddressError::Format(trimmed.to_string()))?;
        }

        Ok(Self(octets))
    }
}

impl FromStr for MacAddress {
    type Err = MacAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
