//! Track registry: venue-name and code resolution
//!
//! This module provides the static lookup table mapping venue names to their
//! stable 2-digit track codes. The registry is injected into the parsing
//! engine and consulted when a document lacks explicit section markers and
//! the venue must be recognized from preamble text.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::app::models::TrackCode;
use crate::constants::TRACK_TABLE;
use crate::{Error, Result};

/// Venue-name to track-code lookup table.
///
/// Name matching is by substring search, longest names first, so that a
/// single-character venue (津) can never shadow a longer one containing it
/// (唐津). A lookup miss yields the `"00"` unknown sentinel, never an error:
/// unresolved venues are data for downstream filtering, not faults.
#[derive(Debug, Clone)]
pub struct TrackRegistry {
    /// (name, code) pairs ordered longest-name-first for matching
    by_name: Vec<(String, String)>,
    /// code -> name for report output
    by_code: HashMap<String, String>,
}

impl TrackRegistry {
    /// Registry over the built-in 24-venue table.
    pub fn builtin() -> Self {
        Self::from_pairs(
            TRACK_TABLE
                .iter()
                .map(|(code, name)| (name.to_string(), code.to_string())),
        )
    }

    /// Load a registry from a JSON object of `{"venue name": "code"}` pairs.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::track_registry(format!(
                "failed to read track table {}: {}",
                path.display(),
                e
            ))
        })?;

        let table: HashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
            Error::track_registry(format!(
                "invalid track table JSON in {}: {}",
                path.display(),
                e
            ))
        })?;

        if table.is_empty() {
            return Err(Error::track_registry(format!(
                "track table {} contains no entries",
                path.display()
            )));
        }

        debug!("Loaded {} tracks from {}", table.len(), path.display());
        Ok(Self::from_pairs(table.into_iter()))
    }

    fn from_pairs(pairs: impl Iterator<Item = (String, String)>) -> Self {
        let mut by_name: Vec<(String, String)> = Vec::new();
        let mut by_code = HashMap::new();

        for (name, code) in pairs {
            by_code.insert(code.clone(), name.clone());
            by_name.push((name, code));
        }

        // Longest-first, then code order for a deterministic tie-break
        by_name.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.1.cmp(&b.1))
        });

        Self { by_name, by_code }
    }

    /// Resolve venue text to a track code by substring search.
    ///
    /// Full-width and half-width spaces are stripped from the candidate first
    /// since venue names are printed with interior padding (大　村). First
    /// match over the longest-first table wins; a miss yields the unknown
    /// sentinel.
    pub fn resolve_name(&self, text: &str) -> TrackCode {
        let compact: String = text.chars().filter(|c| *c != ' ' && *c != '　').collect();

        for (name, code) in &self.by_name {
            if compact.contains(name.as_str()) {
                return TrackCode::new(code);
            }
        }

        debug!("No track matched venue text: {}", text.trim());
        TrackCode::unknown()
    }

    /// Resolve either a 2-digit code or a venue name.
    pub fn resolve(&self, name_or_code: &str) -> TrackCode {
        let trimmed = name_or_code.trim();
        if self.by_code.contains_key(trimmed) {
            return TrackCode::new(trimmed);
        }
        self.resolve_name(trimmed)
    }

    /// Venue name for a code, if known
    pub fn name_of(&self, code: &TrackCode) -> Option<&str> {
        self.by_code.get(code.as_str()).map(String::as_str)
    }

    /// All (code, name) pairs in code order, for registry reports
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .by_code
            .iter()
            .map(|(code, name)| (code.clone(), name.clone()))
            .collect();
        entries.sort();
        entries
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
