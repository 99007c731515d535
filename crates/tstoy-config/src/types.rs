//! Scope, ensure and frequency value types
//!
//! Each type parses case-insensitively, renders as its canonical lowercase
//! string, and travels through JSON as that string (or, for [`Frequency`],
//! as a plain integer).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Which settings file a configuration applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// The machine-wide settings file
    Machine,
    /// The settings file of the current user
    User,
}

impl Scope {
    /// All scopes, machine first.
    pub const ALL: [Scope; 2] = [Scope::Machine, Scope::User];

    const ALLOWED: &'static str = "machine, user";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Machine => "machine",
            Self::User => "user",
        }
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "machine" => Ok(Self::Machine),
            "user" => Ok(Self::User),
            _ => Err(Error::InvalidEnumValue {
                kind: "Scope",
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// Whether the settings file should exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ensure {
    Present,
    Absent,
}

impl Ensure {
    const ALLOWED: &'static str = "absent, present";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

impl FromStr for Ensure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            _ => Err(Error::InvalidEnumValue {
                kind: "Ensure",
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

macro_rules! string_enum_serde {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_enum_serde!(Scope);
string_enum_serde!(Ensure);

/// How many days to wait between update checks.
///
/// Valid values lie in `1..=90`. Zero is reserved for "unset" and never
/// becomes a `Frequency`: parsing paths that accept zero map it to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Frequency(u32);

impl Frequency {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 90;

    /// Create a frequency, rejecting values outside `1..=90`.
    pub fn new(days: i64) -> Result<Self> {
        let frequency = u32::try_from(days)
            .map(Self)
            .map_err(|_| Self::out_of_range(days))?;
        frequency.validate()?;
        Ok(frequency)
    }

    /// Create a frequency without checking its bounds.
    ///
    /// Used for values read back from an existing file, and for desired
    /// settings whose bounds are checked later by [`Settings::validate`].
    ///
    /// [`Settings::validate`]: crate::Settings::validate
    pub const fn unchecked(days: u32) -> Self {
        Self(days)
    }

    /// Parse an optional frequency where `0` means unset.
    pub fn optional(days: i64) -> Result<Option<Self>> {
        if days == 0 {
            Ok(None)
        } else {
            Self::new(days).map(Some)
        }
    }

    /// Parse a requested frequency where `0` means unset.
    ///
    /// Bounds are not checked here: a request to remove the file may carry
    /// any frequency, so [`Settings::validate`] checks them once the target
    /// state is known. Negative values are always rejected.
    ///
    /// [`Settings::validate`]: crate::Settings::validate
    pub fn requested(days: i64) -> Result<Option<Self>> {
        match days {
            0 => Ok(None),
            _ => u32::try_from(days)
                .map(|days| Some(Self(days)))
                .map_err(|_| Self::out_of_range(days)),
        }
    }

    pub fn days(self) -> u32 {
        self.0
    }

    pub fn validate(self) -> Result<()> {
        if (Self::MIN..=Self::MAX).contains(&self.0) {
            Ok(())
        } else {
            Err(Self::out_of_range(i64::from(self.0)))
        }
    }

    fn out_of_range(value: i64) -> Error {
        Error::OutOfRange {
            value,
            min: Self::MIN,
            max: Self::MAX,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let days: i64 = s.trim().parse().map_err(|_| Error::InvalidEnumValue {
            kind: "Frequency",
            value: s.to_string(),
            allowed: "an integer between 1 and 90",
        })?;
        Self::new(days)
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let days = i64::deserialize(deserializer)?;
        Self::new(days).map_err(serde::de::Error::custom)
    }
}

/// Serde helpers for optional frequency fields.
pub(crate) mod frequency_serde {
    use super::Frequency;
    use serde::{Deserialize, Deserializer};
    use serde_json::Number;

    /// Desired-state decoding: `0` and `null` are unset. See
    /// [`Frequency::requested`].
    pub fn requested<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Frequency>, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            None => Ok(None),
            Some(days) => Frequency::requested(days).map_err(serde::de::Error::custom),
        }
    }

    /// Stored-state decoding: `0` is unset, any other non-negative whole
    /// number (`30` or `30.0`) is taken as written so it can be carried
    /// forward untouched.
    pub fn stored<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Frequency>, D::Error> {
        let Some(number) = Option::<Number>::deserialize(deserializer)? else {
            return Ok(None);
        };

        let days = number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        });
        match days.map(u32::try_from) {
            Some(Ok(0)) => Ok(None),
            Some(Ok(days)) => Ok(Some(Frequency::unchecked(days))),
            _ => Err(serde::de::Error::custom(format!(
                "expected a non-negative whole number of days, found {number}"
            ))),
        }
    }
}
