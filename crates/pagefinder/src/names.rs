//! Normalized page and field names.
//!
//! Page models expose their fields under the lowerCamelCase form of the
//! conceptual name, so `"HomePage"` and `"homePage"` address the same page.
//! The rule is applied once, when the name is constructed.

use std::fmt;

/// Force the first character to lower case, leaving the rest untouched
#[must_use]
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

macro_rules! normalized_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Normalize a caller-supplied name
            #[must_use]
            pub fn new(name: &str) -> Self {
                Self(decapitalize(name.trim()))
            }

            /// The normalized name
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::new(&name)
            }
        }

        impl From<&String> for $name {
            fn from(name: &String) -> Self {
                Self::new(name)
            }
        }
    };
}

normalized_name!(
    /// Name of a page field on the repository
    PageName
);

normalized_name!(
    /// Name of an element, list or component field on a page or component
    FieldName
);
