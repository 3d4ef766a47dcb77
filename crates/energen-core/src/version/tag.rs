//! Version tags.
//!
//! A version tag is `{major, minor}` and serializes with a derived
//! `string` field (`v{major}.{minor}`) so downstream JSON consumers can
//! display it without reassembling.

use crate::errors::{QuoteError, Result};
use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::Deserialize;

/// Kind of version increment decided from a change report.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IncrementKind {
    /// No change detected; version stays put
    None,
    /// Price-affecting change within the same scope of work
    Minor,
    /// Scope-of-work change; prior official copy gets superseded
    Major,
}

impl std::fmt::Display for IncrementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncrementKind::None => write!(f, "none"),
            IncrementKind::Minor => write!(f, "minor"),
            IncrementKind::Major => write!(f, "major"),
        }
    }
}

/// A quote version: major.minor.
///
/// Ordering is lexicographic on (major, minor), which is exactly the
/// "later version" relation the change log invariant depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTag {
    pub major: u32,
    pub minor: u32,
}

impl VersionTag {
    /// The version every new quote starts at: v1.0.
    pub fn initial() -> Self {
        Self { major: 1, minor: 0 }
    }

    /// Render as `v{major}.{minor}`.
    pub fn as_string(&self) -> String {
        format!("v{}.{}", self.major, self.minor)
    }

    /// Apply an increment. `None` returns the tag unchanged.
    pub fn increment(&self, kind: IncrementKind) -> VersionTag {
        match kind {
            IncrementKind::None => *self,
            IncrementKind::Minor => VersionTag {
                major: self.major,
                minor: self.minor + 1,
            },
            IncrementKind::Major => VersionTag {
                major: self.major + 1,
                minor: 0,
            },
        }
    }

    /// Parse a version string matching `v?<major>.<minor>`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVersionString` on any other shape.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || QuoteError::InvalidVersionString {
            input: input.to_string(),
        };

        let body = input.strip_prefix('v').unwrap_or(input);
        let (major, minor) = body.split_once('.').ok_or_else(invalid)?;
        if major.is_empty()
            || minor.is_empty()
            || !major.bytes().all(|b| b.is_ascii_digit())
            || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        Ok(VersionTag {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl std::fmt::Display for VersionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

impl serde::Serialize for VersionTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VersionTag", 3)?;
        state.serialize_field("major", &self.major)?;
        state.serialize_field("minor", &self.minor)?;
        state.serialize_field("string", &self.as_string())?;
        state.end()
    }
}

impl<'de> serde::Deserialize<'de> for VersionTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // The `string` field is derived; only major/minor are read back.
        #[derive(Deserialize)]
        struct Repr {
            major: u32,
            minor: u32,
        }
        let repr = Repr::deserialize(deserializer)?;
        Ok(VersionTag {
            major: repr.major,
            minor: repr.minor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_is_v1_0() {
        assert_eq!(VersionTag::initial().as_string(), "v1.0");
    }

    #[test]
    fn test_increment_minor_preserves_major() {
        let v = VersionTag { major: 2, minor: 3 };
        assert_eq!(v.increment(IncrementKind::Minor), VersionTag { major: 2, minor: 4 });
    }

    #[test]
    fn test_increment_major_resets_minor() {
        let v = VersionTag { major: 2, minor: 3 };
        assert_eq!(v.increment(IncrementKind::Major), VersionTag { major: 3, minor: 0 });
    }

    #[test]
    fn test_increment_is_monotonic() {
        let v = VersionTag { major: 1, minor: 9 };
        assert!(v.increment(IncrementKind::Minor) > v);
        assert!(v.increment(IncrementKind::Major) > v);
        assert_eq!(v.increment(IncrementKind::None), v);
    }

    #[test]
    fn test_parse_accepts_optional_prefix() {
        assert_eq!(VersionTag::parse("v2.1").unwrap(), VersionTag { major: 2, minor: 1 });
        assert_eq!(VersionTag::parse("2.1").unwrap(), VersionTag { major: 2, minor: 1 });
    }

    #[test]
    fn test_parse_round_trip() {
        let mut v = VersionTag::initial();
        for kind in [IncrementKind::Minor, IncrementKind::Major, IncrementKind::Minor] {
            v = v.increment(kind);
            assert_eq!(VersionTag::parse(&v.as_string()).unwrap(), v);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "v2", "2", "v2.x", "x.1", "v2.1.3", "v-1.0", "v2.", ".1"] {
            assert!(
                VersionTag::parse(input).is_err(),
                "expected parse failure for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_serialize_includes_derived_string() {
        let json = serde_json::to_value(VersionTag { major: 2, minor: 0 }).unwrap();
        assert_eq!(json["major"], 2);
        assert_eq!(json["minor"], 0);
        assert_eq!(json["string"], "v2.0");
    }

    #[test]
    fn test_deserialize_ignores_stale_string_field() {
        let v: VersionTag =
            serde_json::from_str(r#"{"major":3,"minor":1,"string":"v9.9"}"#).unwrap();
        assert_eq!(v, VersionTag { major: 3, minor: 1 });
    }
}
