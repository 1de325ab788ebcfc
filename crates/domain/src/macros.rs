//! Macro for implementing Display and FromStr for wire-string enums
//!
//! Several small enums travel as fixed lowercase strings (library kinds,
//! upload steps). This macro gives each of them the same `Display` output and
//! case-insensitive `FromStr` parsing.
//!
//! # Example
//!
//! ```rust
//! use zotero_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum SortDirection {
//!     Asc,
//!     Desc,
//! }
//!
//! impl_domain_status_conversions!(SortDirection {
//!     Asc => "asc",
//!     Desc => "desc",
//! });
//!
//! assert_eq!(SortDirection::Desc.to_string(), "desc");
//! assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
//! ```

/// Implements Display and FromStr for enums with a fixed string form
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase wire
///   strings
///
/// Parsing is case-insensitive; unknown input yields a `String` error naming
/// the enum.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
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

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum QueryMode {
        TitleCreatorYear,
        Everything,
    }

    impl_domain_status_conversions!(QueryMode {
        TitleCreatorYear => "titlecreatoryear",
        Everything => "everything",
    });

    #[test]
    fn display_uses_wire_string() {
        assert_eq!(QueryMode::TitleCreatorYear.to_string(), "titlecreatoryear");
        assert_eq!(QueryMode::Everything.to_string(), "everything");
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(QueryMode::from_str("Everything").unwrap(), QueryMode::Everything);
        assert_eq!(QueryMode::from_str(" TITLECREATORYEAR ").unwrap(), QueryMode::TitleCreatorYear);
    }

    #[test]
    fn unknown_value_names_the_enum() {
        let err = QueryMode::from_str("fulltext").unwrap_err();
        assert!(err.contains("Invalid QueryMode: fulltext"));
        assert!(QueryMode::from_str("").is_err());
    }
}
