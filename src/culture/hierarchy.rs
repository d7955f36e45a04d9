//! Parent relationship between cultures.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Culture;

/// Cultures whose parent is not obtained by dropping the last subtag.
static PARENT_OVERRIDES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("zh-CN", "zh-Hans"),
        ("zh-SG", "zh-Hans"),
        ("zh-HK", "zh-Hant"),
        ("zh-MO", "zh-Hant"),
        ("zh-TW", "zh-Hant"),
        ("zh-Hans", "zh"),
        ("zh-Hant", "zh"),
    ]
    .into_iter()
    .collect()
});

/// The culture database: supplies each culture's parent.
///
/// Implementations must return the invariant culture as its own parent so
/// that parent walks terminate.
pub trait CultureHierarchy: Send + Sync {
    fn parent(&self, culture: &Culture) -> Culture;
}

/// Subtag-truncation hierarchy with a small override table for Chinese
/// script cultures.
///
/// - `fr-FR` → `fr` → invariant
/// - `zh-TW` → `zh-Hant` → `zh` → invariant
/// - `sr-Cyrl-BA` → `sr-Cyrl` → `sr` → invariant
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHierarchy;

impl CultureHierarchy for DefaultHierarchy {
    fn parent(&self, culture: &Culture) -> Culture {
        if culture.is_invariant() {
            return Culture::invariant();
        }

        if let Some(parent) = PARENT_OVERRIDES.get(culture.name()) {
            return Culture::new(parent);
        }

        culture
            .name()
            .rsplit_once('-')
            .map_or_else(Culture::invariant, |(parent, _)| Culture::new(parent))
    }
}

/// Iterator over a culture and its ancestors, most specific first.
///
/// Stops after yielding a self-parenting culture, after revisiting a culture
/// (cyclic hierarchy), or after `max_depth` cultures. The start culture is
/// always yielded, even when `max_depth` is `0`.
#[derive(Debug)]
pub struct ParentChain<'a, H: ?Sized> {
    /// Culture database
    hierarchy: &'a H,
    /// Next culture to yield
    cursor: Option<Culture>,
    /// Cultures already yielded
    visited: Vec<Culture>,
    /// Maximum number of cultures to yield
    max_depth: usize,
}

impl<'a, H: CultureHierarchy + ?Sized> ParentChain<'a, H> {
    #[must_use]
    pub const fn new(hierarchy: &'a H, start: Culture, max_depth: usize) -> Self {
        let max_depth = if max_depth == 0 { 1 } else { max_depth };
        Self { hierarchy, cursor: Some(start), visited: Vec::new(), max_depth }
    }
}

impl<H: CultureHierarchy + ?Sized> Iterator for ParentChain<'_, H> {
    type Item = Culture;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;

        if self.visited.len() >= self.max_depth {
            tracing::warn!(
                culture = %current,
                max_depth = self.max_depth,
                "Parent chain exceeded maximum depth, stopping walk"
            );
            return None;
        }

        if self.visited.contains(&current) {
            tracing::warn!(culture = %current, "Cyclic culture hierarchy detected, stopping walk");
            return None;
        }

        let parent = self.hierarchy.parent(&current);
        if parent != current {
            self.cursor = Some(parent);
        }
        self.visited.push(current.clone());

        Some(current)
    }
}
