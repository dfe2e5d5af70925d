//! Wire representation shared by the API enums.
//!
//! Enum fields travel either as the protobuf enum name or as its number.
//! Values this build does not know are preserved as `Unrecognized` so the
//! caller decides what to do with them instead of the JSON decoder.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum WireValue {
    Number(i64),
    Name(String),
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($wire:literal, $num:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Wire value not known to this build (kept verbatim)
            Unrecognized(String),
        }

        impl $name {
            /// Protobuf enum name, or the raw value for unrecognized input
            pub fn as_str_name(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Unrecognized(raw) => raw.as_str(),
                }
            }

            pub fn from_str_name(name: &str) -> Self {
                match name {
                    $( $wire => Self::$variant, )+
                    other => Self::Unrecognized(other.to_string()),
                }
            }

            pub fn from_i32(value: i32) -> Self {
                match value {
                    $( $num => Self::$variant, )+
                    other => Self::Unrecognized(other.to_string()),
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::from_i32(0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str_name())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str_name())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(match <$crate::v1::wire::WireValue as serde::Deserialize>::deserialize(deserializer)? {
                    $crate::v1::wire::WireValue::Number(n) => i32::try_from(n)
                        .map(Self::from_i32)
                        .unwrap_or_else(|_| Self::Unrecognized(n.to_string())),
                    $crate::v1::wire::WireValue::Name(name) => Self::from_str_name(&name),
                })
            }
        }
    };
}
