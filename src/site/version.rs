//! Build version identifiers

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A dotted numeric version such as `0.1.0`, `2.3` or `7`.
///
/// Every successful build advances it once through [`Version::next`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    /// The successor of this version: the last component incremented
    pub fn next(&self) -> Self {
        let mut parts = self.parts.clone();
        if let Some(last) = parts.last_mut() {
            *last += 1;
        }
        Self { parts }
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }
}

impl Default for Version {
    fn default() -> Self {
        Self {
            parts: vec![0, 1, 0],
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

/// Error for strings that are not dotted numeric versions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version `{0}`")]
pub struct InvalidVersion(pub String);

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('v');
        if trimmed.is_empty() {
            return Err(InvalidVersion(s.to_string()));
        }
        let parts = trimmed
            .split('.')
            .map(|p| p.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| InvalidVersion(s.to_string()))?;
        Ok(Self { parts })
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts both `version: "0.1.0"` and bare numbers like `version: 7`
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a dotted numeric version string or a number")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Version, E> {
                value.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Version, E> {
                Ok(Version { parts: vec![value] })
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Version, E> {
                u64::try_from(value)
                    .map(|v| Version { parts: vec![v] })
                    .map_err(|_| E::custom(InvalidVersion(value.to_string())))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Version, E> {
                value.to_string().parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(VersionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_increments_last_component() {
        let v: Version = "0.1.9".parse().unwrap();
        assert_eq!(v.next().to_string(), "0.1.10");
        let v: Version = "7".parse().unwrap();
        assert_eq!(v.next().to_string(), "8");
        assert!(v.next() > v);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Version>().is_err());
        assert!("1.x".parse::<Version>().is_err());
        assert_eq!("v1.2".parse::<Version>().unwrap().parts(), &[1, 2]);
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let v: Version = serde_yaml::from_str("12").unwrap();
        assert_eq!(v.to_string(), "12");
        let v: Version = serde_yaml::from_str("\"1.4.2\"").unwrap();
        assert_eq!(v.to_string(), "1.4.2");
        let v: Version = serde_yaml::from_str("2.5").unwrap();
        assert_eq!(v.to_string(), "2.5");
        assert!(serde_yaml::from_str::<Version>("-3").is_err());
    }
}
