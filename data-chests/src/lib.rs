use data_error::{CrError, Result};
use data_player::PlayerSnapshot;

pub const GIANT: &str = "Giant";
pub const MAGIC: &str = "Magic";
pub const SUPER_MAGICAL: &str = "super_magical";
pub const LEGENDARY: &str = "legendary";
pub const EPIC: &str = "epic";

/// One point of the chest timeline: a chest type and how many chests
/// away from now it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub chest: &'static str,
    pub value: usize,
}

/// Zero-based position of the first `chest` in the full cycle definition.
///
/// Every supported chest type appears in a complete cycle, so absence is
/// reported as an error rather than defaulted.
pub fn first_index_of(fullcycle: &[String], chest: &str) -> Result<usize> {
    fullcycle
        .iter()
        .position(|c| c == chest)
        .ok_or_else(|| CrError::ChestTypeNotFound(chest.to_owned()))
}

/// Merge the special chest counters with the positions of the giant and
/// magical chests, ordered by how soon each chest arrives.
pub fn chest_timeline(player: &PlayerSnapshot) -> Result<Vec<TimelineEntry>> {
    let chests = &player.chests;
    let mut timeline = vec![
        TimelineEntry {
            chest: SUPER_MAGICAL,
            value: chests.super_magical as usize,
        },
        TimelineEntry {
            chest: LEGENDARY,
            value: chests.legendary as usize,
        },
        TimelineEntry {
            chest: EPIC,
            value: chests.epic as usize,
        },
    ];
    for chest in [GIANT, MAGIC] {
        let value = first_index_of(&chests.fullcycle, chest).map_err(|e| {
            log::warn!(
                "chests: #{} has no {} chest in its cycle",
                player.tag,
                chest
            );
            e
        })?;
        timeline.push(TimelineEntry { chest, value });
    }

    // stable: ties keep the order above
    timeline.sort_by_key(|entry| entry.value);
    Ok(timeline)
}
