//! Culture identifiers and their parent hierarchy.

/// Known culture codes and path-based detection
pub mod codes;
/// Parent relationship between cultures
pub mod hierarchy;

use std::fmt;

pub use hierarchy::{
    CultureHierarchy,
    DefaultHierarchy,
};

/// Environment variables consulted by [`Culture::from_env`], in priority order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A hierarchical culture name such as `fr-FR`.
///
/// The invariant culture has an empty name and is the root of every parent
/// chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Culture {
    /// Canonical name (e.g. `zh-Hant-TW`), empty for invariant
    name: String,
}

impl Culture {
    /// Creates a culture from a tag, canonicalizing separators and subtag case.
    ///
    /// # Examples
    /// ```
    /// use satellite_resources::culture::Culture;
    ///
    /// assert_eq!(Culture::new("en_us").name(), "en-US");
    /// assert_eq!(Culture::new("zh-hant-tw").name(), "zh-Hant-TW");
    /// assert!(Culture::new("C").is_invariant());
    /// ```
    #[must_use]
    pub fn new(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() || tag == "C" || tag == "POSIX" {
            return Self::invariant();
        }

        let name = tag
            .split(['-', '_'])
            .filter(|subtag| !subtag.is_empty())
            .enumerate()
            .map(|(index, subtag)| canonicalize_subtag(index, subtag))
            .collect::<Vec<_>>()
            .join("-");

        Self { name }
    }

    /// The invariant (root) culture.
    #[must_use]
    pub const fn invariant() -> Self {
        Self { name: String::new() }
    }

    #[must_use]
    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds a culture from a POSIX locale string such as `fr_FR.UTF-8@euro`.
    #[must_use]
    pub fn from_posix_locale(locale: &str) -> Self {
        let without_modifier = locale.split('@').next().unwrap_or_default();
        let without_encoding = without_modifier.split('.').next().unwrap_or_default();
        Self::new(without_encoding)
    }

    /// Reads the current culture from `LC_ALL`, `LC_MESSAGES` or `LANG`.
    ///
    /// Falls back to invariant when none is set.
    #[must_use]
    pub fn from_env() -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .map_or_else(Self::invariant, |value| {
                tracing::debug!(locale = %value, "Detected culture from environment");
                Self::from_posix_locale(&value)
            })
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() { f.write_str("(invariant)") } else { f.write_str(&self.name) }
    }
}

impl From<&str> for Culture {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Canonicalizes one subtag by position and length (BCP 47 casing conventions).
fn canonicalize_subtag(index: usize, subtag: &str) -> String {
    if index == 0 {
        return subtag.to_lowercase();
    }

    match subtag.len() {
        2 if subtag.chars().all(|c| c.is_ascii_alphabetic()) => subtag.to_uppercase(),
        4 if subtag.chars().all(|c| c.is_ascii_alphabetic()) => {
            let mut chars = subtag.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        }
        _ => subtag.to_lowercase(),
    }
}
