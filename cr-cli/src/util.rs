use std::fmt::Write;
use std::path::PathBuf;

use data_chests::chest_timeline;
use data_tiers::TierTable;
use fs_records::{MemberTags, PlayerRecordStore, DATA_FOLDER, MEMBERS_FILE};
use home::home_dir;
use profile_resolver::{
    CachedResult, HttpProfileSource, ProfileResolver, Resolution,
};

use crate::config::Settings;
use crate::AppError;

/// Everything a command needs: where the data lives and how to reach the
/// profile API.
pub struct Context {
    pub data_dir: PathBuf,
    pub settings: Settings,
}

impl Context {
    pub fn load(data_dir: &Option<PathBuf>) -> Result<Self, AppError> {
        let data_dir = provide_data_dir(data_dir)?;
        std::fs::create_dir_all(&data_dir)?;
        let settings = Settings::load(&data_dir)?;
        log::debug!("cli: data directory {}", data_dir.display());
        Ok(Self { data_dir, settings })
    }

    pub fn resolver(&self) -> Result<ProfileResolver<HttpProfileSource>, AppError> {
        let config = self.settings.resolver_config();
        let source = HttpProfileSource::new(&config)?;
        let records = PlayerRecordStore::open(&self.data_dir)?;
        Ok(ProfileResolver::new(source, records, config.fetch_timeout))
    }

    pub fn members(&self) -> Result<MemberTags, AppError> {
        Ok(MemberTags::new(
            "member tags".to_owned(),
            &self.data_dir.join(MEMBERS_FILE),
        )?)
    }

    /// The arena table, if the reference file is present and well-formed.
    pub fn tiers(&self) -> Option<TierTable> {
        let path = self.settings.arenas_path(&self.data_dir);
        match TierTable::from_path(&path) {
            Ok(table) => Some(table),
            Err(e) => {
                log::warn!("cli: arenas unavailable at {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn arenas_path(&self) -> PathBuf {
        self.settings.arenas_path(&self.data_dir)
    }
}

pub fn provide_data_dir(data_dir: &Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(path) = data_dir {
        Ok(path.clone())
    } else {
        home_dir()
            .map(|home| home.join(DATA_FOLDER))
            .ok_or(AppError::HomeDirNotFound)
    }
}

/// Map a resolution to the displayable result or a user-facing error.
pub fn expect_resolved(resolution: Resolution) -> Result<CachedResult, AppError> {
    match resolution {
        Resolution::Resolved(result) => Ok(result),
        Resolution::Unavailable(tag) => {
            Err(AppError::ProfileUnavailable(tag.to_string()))
        }
        Resolution::Invalid(invalid_chars) => {
            let validation = data_tag::ValidationResult {
                valid: false,
                invalid_chars,
            };
            Err(AppError::InvalidTag(validation.error_message()))
        }
    }
}

pub fn render_profile(result: &CachedResult, tiers: Option<&TierTable>) -> String {
    let player = &result.snapshot;
    let mut out = String::new();

    if let Some(notice) = result.stale_notice() {
        let _ = writeln!(out, "{}", notice);
    }
    let _ = writeln!(out, "{} (#{})", player.username, player.tag);
    let _ = writeln!(
        out,
        "Level {} ({} xp)",
        player.level,
        player.experience_display()
    );
    let _ = writeln!(
        out,
        "Trophies: {} (highest {}, legend {})",
        player.trophies.current, player.trophies.highest, player.trophies.legend
    );
    if let Some(tiers) = tiers {
        let arena = tiers.describe(player.trophies.current);
        if !arena.is_empty() {
            let _ = writeln!(out, "Arena: {}", arena);
        }
    }
    match &player.clan {
        Some(clan) => {
            let _ = writeln!(out, "Clan: {} (#{}), {}", clan.name, clan.tag, clan.role);
        }
        None => {
            let _ = writeln!(out, "Clan: none");
        }
    }
    let ratio = player
        .win_ratio()
        .map(|ratio| format!("{:.2}%", ratio))
        .unwrap_or_else(|| "n/a".to_owned());
    let _ = writeln!(
        out,
        "Wins {} / Losses {} / Draws {} (win ratio {}, three crowns {})",
        player.wins, player.losses, player.draws, ratio, player.three_crown_wins
    );
    let _ = writeln!(
        out,
        "Cards found: {}, favorite: {}",
        player.cards_found, player.favorite_card
    );
    if let (Some(gold), Some(gems)) = (player.gold, player.gems) {
        let _ = writeln!(out, "Gold: {}, gems: {}", gold, gems);
    }
    out
}

pub fn render_chests(result: &CachedResult) -> String {
    let player = &result.snapshot;
    let mut out = String::new();

    if let Some(notice) = result.stale_notice() {
        let _ = writeln!(out, "{}", notice);
    }
    let _ = writeln!(out, "Upcoming: {}", player.chests.cycle.join(", "));
    match chest_timeline(player) {
        Ok(timeline) => {
            for entry in timeline {
                let _ = writeln!(out, "+{:<4} {}", entry.value, entry.chest);
            }
        }
        Err(e) => {
            let _ = writeln!(out, "Chest timeline unavailable: {}", e);
        }
    }
    out
}
