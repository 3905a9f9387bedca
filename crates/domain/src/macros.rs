//! Macro for implementing Display and FromStr for small domain enums
//!
//! Several domain enums (activity sources, record kinds, LLM providers) are
//! written to JSON documents, read from configuration, and parsed from CLI
//! flags. This macro gives all of them one consistent, case-insensitive
//! string form.
//!
//! # Example
//!
//! ```rust
//! use daysheet_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Email,
//!     Chat,
//! }
//!
//! impl_domain_status_conversions!(Channel {
//!     Email => "email",
//!     Chat => "chat",
//! });
//!
//! assert_eq!(Channel::Chat.to_string(), "chat");
//! assert_eq!("EMAIL".parse::<Channel>().unwrap(), Channel::Email);
//! ```

/// Implements Display and FromStr traits for string-valued enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their lowercase strings
/// - FromStr trait: parses case-insensitive, whitespace-trimmed strings
///
/// Parsing failures return a `String` naming the enum and the rejected
/// value.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
