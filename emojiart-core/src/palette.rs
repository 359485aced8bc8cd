//! Named emoji palettes the UI offers for dragging onto the canvas.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ordered collection of named glyph palettes.
///
/// Palettes are keyed by name; insertion order is stable, and cycling
/// with [`name_after`](Self::name_after) / [`name_before`](Self::name_before)
/// wraps around. Glyph strings are kept free of duplicate characters.
/// The collection is serializable so an embedder can persist it through
/// its [`DocumentStore`](crate::DocumentStore) under a key of its own;
/// palettes are app-level state and never enter a document blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palettes {
    names: Vec<String>,
    glyphs: HashMap<String, String>,
}

impl Default for Palettes {
    fn default() -> Self {
        let mut palettes = Self::empty();
        palettes.insert("Faces", "😀😆😂🙄💀😳");
        palettes.insert("Animals", "🐶🐱🐭🦊🐻🐼");
        palettes.insert("Sports", "⚽🏀🏈⚾🎾🏐");
        palettes.insert("Weather", "☀🌧❄🌩🌈");
        palettes
    }
}

impl Palettes {
    /// The built-in starter palettes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection with no palettes.
    #[must_use]
    pub fn empty() -> Self {
        Self { names: Vec::new(), glyphs: HashMap::new() }
    }

    /// Insert a palette, replacing the glyphs of an existing name.
    pub fn insert(&mut self, name: &str, glyphs: &str) {
        if !self.glyphs.contains_key(name) {
            self.names.push(name.to_owned());
        }
        self.glyphs.insert(name.to_owned(), dedup_glyphs("", glyphs));
    }

    /// Palette names in insertion order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The glyph string of a palette.
    #[must_use]
    pub fn glyphs(&self, name: &str) -> Option<&str> {
        self.glyphs.get(name).map(String::as_str)
    }

    /// The glyphs of the first palette, or an empty string if there are
    /// none. This is what a fresh chooser shows.
    #[must_use]
    pub fn default_palette(&self) -> &str {
        self.names
            .first()
            .and_then(|name| self.glyphs(name))
            .unwrap_or("")
    }

    /// The name following `name` in insertion order, wrapping at the end.
    /// Unknown names fall back to the first palette.
    #[must_use]
    pub fn name_after(&self, name: &str) -> Option<&str> {
        self.cycle(name, 1)
    }

    /// The name preceding `name` in insertion order, wrapping at the
    /// start. Unknown names fall back to the first palette.
    #[must_use]
    pub fn name_before(&self, name: &str) -> Option<&str> {
        self.cycle(name, -1)
    }

    /// Rename a palette in place, keeping its position and glyphs.
    /// Returns `false` when `name` is unknown or `new_name` is taken.
    pub fn rename(&mut self, name: &str, new_name: &str) -> bool {
        if name == new_name {
            return true;
        }
        if self.glyphs.contains_key(new_name) {
            return false;
        }
        let Some(position) = self.names.iter().position(|n| n == name) else {
            return false;
        };
        let glyphs = self.glyphs.remove(name).unwrap_or_default();
        self.names[position] = new_name.to_owned();
        self.glyphs.insert(new_name.to_owned(), glyphs);
        true
    }

    /// Prepend glyphs to a palette, dropping characters already present.
    /// Returns the updated glyph string.
    pub fn add_glyphs(&mut self, name: &str, glyphs: &str) -> Option<&str> {
        let entry = self.glyphs.get_mut(name)?;
        *entry = dedup_glyphs(glyphs, entry);
        Some(entry)
    }

    /// Remove glyphs from a palette. Returns the updated glyph string.
    pub fn remove_glyphs(&mut self, name: &str, glyphs: &str) -> Option<&str> {
        let entry = self.glyphs.get_mut(name)?;
        *entry = entry.chars().filter(|c| !glyphs.contains(*c)).collect();
        Some(entry)
    }

    /// Number of palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no palettes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn cycle(&self, name: &str, step: isize) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        let len = self.names.len() as isize;
        let index = self
            .names
            .iter()
            .position(|n| n == name)
            .map_or(0, |position| {
                (position as isize + step).rem_euclid(len) as usize
            });
        self.names.get(index).map(String::as_str)
    }
}

/// Concatenate `prefix` and `glyphs`, keeping the first occurrence of
/// each character.
fn dedup_glyphs(prefix: &str, glyphs: &str) -> String {
    let mut seen = std::collections::HashSet::new();
    prefix
        .chars()
        .chain(glyphs.chars())
        .filter(|c| seen.insert(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_seeded_in_order() {
        let palettes = Palettes::new();
        assert_eq!(palettes.names()[0], "Faces");
        assert!(!palettes.default_palette().is_empty());
    }

    #[test]
    fn test_cycling_wraps_both_ways() {
        let mut palettes = Palettes::empty();
        palettes.insert("A", "😀");
        palettes.insert("B", "💀");
        palettes.insert("C", "😳");

        assert_eq!(palettes.name_after("A"), Some("B"));
        assert_eq!(palettes.name_after("C"), Some("A"));
        assert_eq!(palettes.name_before("A"), Some("C"));
    }

    #[test]
    fn test_cycling_unknown_name_falls_back_to_first() {
        let mut palettes = Palettes::empty();
        palettes.insert("A", "😀");
        palettes.insert("B", "💀");
        assert_eq!(palettes.name_after("missing"), Some("A"));
    }

    #[test]
    fn test_cycling_empty_collection() {
        let palettes = Palettes::empty();
        assert_eq!(palettes.name_after("anything"), None);
        assert_eq!(palettes.default_palette(), "");
    }

    #[test]
    fn test_rename_keeps_position_and_glyphs() {
        let mut palettes = Palettes::empty();
        palettes.insert("A", "😀");
        palettes.insert("B", "💀");

        assert!(palettes.rename("A", "Renamed"));
        assert_eq!(palettes.names()[0], "Renamed");
        assert_eq!(palettes.glyphs("Renamed"), Some("😀"));
        assert_eq!(palettes.glyphs("A"), None);
    }

    #[test]
    fn test_rename_rejects_taken_and_unknown_names() {
        let mut palettes = Palettes::empty();
        palettes.insert("A", "😀");
        palettes.insert("B", "💀");

        assert!(!palettes.rename("A", "B"));
        assert!(!palettes.rename("missing", "C"));
    }

    #[test]
    fn test_add_glyphs_dedups() {
        let mut palettes = Palettes::empty();
        palettes.insert("A", "😀💀");
        let updated = palettes.add_glyphs("A", "💀😳").expect("palette");
        assert_eq!(updated, "💀😳😀");
    }

    #[test]
    fn test_remove_glyphs() {
        let mut palettes = Palettes::empty();
        palettes.insert("A", "😀💀😳");
        let updated = palettes.remove_glyphs("A", "💀").expect("palette");
        assert_eq!(updated, "😀😳");
    }

    #[test]
    fn test_unknown_palette_edits_return_none() {
        let mut palettes = Palettes::empty();
        assert!(palettes.add_glyphs("missing", "😀").is_none());
        assert!(palettes.remove_glyphs("missing", "😀").is_none());
    }
}
