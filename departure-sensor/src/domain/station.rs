//! Station code types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code {input:?}: {reason}")]
pub struct InvalidCrs {
    input: String,
    reason: &'static str,
}

/// A 3-letter CRS (Computer Reservation System) station code.
///
/// Darwin identifies every station on a departure board by its CRS code,
/// and the same codes key the station lookup table. A `Crs` always holds
/// exactly three uppercase ASCII letters.
///
/// # Examples
///
/// ```
/// use departure_sensor::domain::Crs;
///
/// let kgx = Crs::parse("KGX").unwrap();
/// assert_eq!(kgx.as_str(), "KGX");
///
/// // Strict parsing rejects lowercase, normalizing parsing accepts it
/// assert!(Crs::parse("kgx").is_err());
/// assert_eq!(Crs::normalize(" kgx ").unwrap(), kgx);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a CRS code that must already be exactly 3 uppercase letters.
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let invalid = |reason| InvalidCrs {
            input: s.to_string(),
            reason,
        };

        let bytes: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| invalid("must be exactly 3 characters"))?;

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(invalid("must be uppercase ASCII letters A-Z"));
        }

        Ok(Crs(bytes))
    }

    /// Parse user-supplied input, trimming whitespace and upper-casing first.
    ///
    /// Configuration and the knowledgebase feed both carry lowercase codes.
    pub fn normalize(s: &str) -> Result<Self, InvalidCrs> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the CRS code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Crs {
    type Err = InvalidCrs;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Crs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Deserializes strictly: stored codes are already normalized.
impl<'de> Deserialize<'de> for Crs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Self::parse(&code).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_crs() {
        for code in ["KGX", "PAD", "EDB", "AAA", "ZZZ"] {
            assert_eq!(Crs::parse(code).unwrap().as_str(), code);
        }
    }

    #[test]
    fn reject_lowercase_and_mixed_case() {
        assert!(Crs::parse("kgx").is_err());
        assert!(Crs::parse("Kgx").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(Crs::parse("").is_err());
        assert!(Crs::parse("KG").is_err());
        assert!(Crs::parse("KGXX").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(Crs::parse("K1X").is_err());
        assert!(Crs::parse("K X").is_err());
        assert!(Crs::parse("KÖ").is_err());
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(Crs::normalize("pad").unwrap().as_str(), "PAD");
        assert_eq!(Crs::normalize("  Kgx\n").unwrap().as_str(), "KGX");
        assert!(Crs::normalize("kings cross").is_err());
    }

    #[test]
    fn error_mentions_input() {
        let err = Crs::parse("KG").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid CRS code \"KG\": must be exactly 3 characters"
        );
    }

    #[test]
    fn from_str_and_display() {
        let crs: Crs = "EUS".parse().unwrap();
        assert_eq!(crs.to_string(), "EUS");
        assert_eq!(format!("{crs:?}"), "Crs(EUS)");
    }

    #[test]
    fn serde_uses_the_code_string() {
        let crs = Crs::parse("YRK").unwrap();
        assert_eq!(serde_json::to_string(&crs).unwrap(), "\"YRK\"");
        assert_eq!(serde_json::from_str::<Crs>("\"YRK\"").unwrap(), crs);
        assert!(serde_json::from_str::<Crs>("\"york\"").is_err());
    }
}
