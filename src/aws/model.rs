//! Shared model helpers for AWS shapes
//!
//! String enums that tolerate values added by the service after this
//! crate was written, and epoch-second timestamps.

/// Declare a service string enum.
///
/// Deserialization never fails: unrecognised wire values land in
/// `Unknown`. Parsing user input (`FromStr`) is strict and
/// case-insensitive.
macro_rules! aws_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value this crate does not know about
            Unknown(String),
        }

        impl $name {
            /// Wire representation
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Unknown(value) => value,
                }
            }

            /// All known wire values
            pub fn values() -> &'static [&'static str] {
                &[$( $wire ),+]
            }

            /// Exact wire value, keeping unrecognised ones
            fn from_wire(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Unknown(other.to_string()),
                }
            }
        }


        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(value: &str) -> $crate::error::Result<Self> {
                let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
                match Self::from_wire(&normalized) {
                    Self::Unknown(_) => Err($crate::error::Error::invalid_parameter(
                        stringify!($name),
                        format!(
                            "'{value}' is not one of {}",
                            Self::values().join(", ")
                        ),
                    )),
                    known => Ok(known),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Ok(Self::from_wire(&value))
            }
        }
    };
}

pub(crate) use aws_enum;

/// Timestamps sent as (possibly fractional) seconds since the epoch
pub(crate) mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(seconds) = Option::<f64>::deserialize(deserializer)? else {
            return Ok(None);
        };

        let whole = seconds.floor();
        let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
        DateTime::from_timestamp(whole as i64, nanos)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {seconds}")))
    }
}
