//! # Data Tiers
//!
//! Arena and league brackets selected by trophy count. The reference list
//! is loaded once at start-up, sorted by threshold in descending order and
//! validated, then shared read-only.

use serde::{Deserialize, Serialize};
use std::path::Path;

use data_error::{CrError, Result};

/// Raw tier indices up to this value share the league index `0`.
const LEAGUE_OFFSET: u32 = 11;

/// A named bracket with an inclusive lower trophy bound.
///
/// Field names on disk follow the game's reference data
/// (`Name`, `TIDText`, `SubtitleTIDText`, `Arena`, `TrophyLimit`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "TIDText", default)]
    pub title: String,
    #[serde(rename = "SubtitleTIDText", default)]
    pub subtitle: String,
    /// In-game tier index.
    #[serde(rename = "Arena")]
    pub raw_index: u32,
    #[serde(rename = "TrophyLimit")]
    pub threshold: u32,
}

impl TierEntry {
    pub fn new(name: &str, threshold: u32, raw_index: u32) -> Self {
        TierEntry {
            name: name.to_owned(),
            title: name.to_owned(),
            subtitle: String::new(),
            raw_index,
            threshold,
        }
    }

    /// League index: the lowest tiers all collapse into `0`.
    pub fn league(&self) -> u32 {
        self.raw_index.saturating_sub(LEAGUE_OFFSET)
    }

    /// Name of the emoji used to decorate this tier.
    pub fn emoji_name(&self) -> String {
        match self.league() {
            0 => format!("arena{}", self.raw_index),
            league => format!("league{}", league),
        }
    }
}

/// Immutable table of tiers, kept sorted by threshold, highest first.
#[derive(Debug, Clone)]
pub struct TierTable {
    entries: Vec<TierEntry>,
}

impl TierTable {
    /// Sort the entries and check that the table is well-formed:
    /// non-empty, zero-floored and without duplicate thresholds.
    pub fn new(mut entries: Vec<TierEntry>) -> Result<Self> {
        entries.sort_by(|a, b| b.threshold.cmp(&a.threshold));

        match entries.last() {
            None => {
                return Err(CrError::MalformedTierTable(
                    "table is empty".to_owned(),
                ))
            }
            Some(floor) if floor.threshold != 0 => {
                return Err(CrError::MalformedTierTable(format!(
                    "lowest threshold is {}, expected a zero floor",
                    floor.threshold
                )))
            }
            Some(_) => {}
        }

        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].threshold == pair[1].threshold)
        {
            return Err(CrError::MalformedTierTable(format!(
                "{} and {} share threshold {}",
                pair[0].name, pair[1].name, pair[0].threshold
            )));
        }

        log::debug!("tiers: loaded {} entries", entries.len());
        Ok(TierTable { entries })
    }

    /// Load the reference list from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let entries: Vec<TierEntry> = serde_json::from_slice(&bytes)?;
        log::info!(
            "tiers: read {} entries from {}",
            entries.len(),
            path.as_ref().display()
        );
        Self::new(entries)
    }

    /// The entry with the highest threshold not exceeding `trophies`.
    pub fn resolve(&self, trophies: u32) -> Option<&TierEntry> {
        self.entries
            .iter()
            .find(|entry| entry.threshold <= trophies)
    }

    /// `"<title>: <subtitle>"` of the resolved tier, empty if none.
    pub fn describe(&self, trophies: u32) -> String {
        self.resolve(trophies)
            .map(|entry| format!("{}: {}", entry.title, entry.subtitle))
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &[TierEntry] {
        &self.entries
    }
}
