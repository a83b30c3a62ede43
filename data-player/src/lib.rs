use serde::{Deserialize, Serialize};

use data_error::Result;
use data_tag::PlayerTag;

/// Experience needed to complete each level, indexed by level.
/// Levels past the end of the table are maxed out.
pub const XP_LEVELS: [u64; 13] = [
    0, 20, 50, 100, 200, 400, 1000, 2000, 5000, 10000, 30000, 40000, 80000,
];

/// Offset between a clan's `badge_id` and its key in the badge reference map.
const BADGE_KEY_BASE: u64 = 16_000_000;

/// A complete point-in-time player record, as served by the profile API.
///
/// Snapshots are only ever replaced as a whole; there are no partial
/// field updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub username: String,
    pub tag: PlayerTag,
    pub trophies: Trophies,
    pub level: u32,
    pub experience: u64,
    #[serde(default)]
    pub clan: Option<Clan>,
    pub chests: Chests,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub three_crown_wins: u32,
    pub cards_found: u32,
    pub favorite_card: String,
    #[serde(default)]
    pub gold: Option<u64>,
    #[serde(default)]
    pub gems: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trophies {
    pub current: u32,
    pub highest: u32,
    /// Legendary trophies, counted separately from ladder trophies.
    pub legend: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clan {
    pub name: String,
    pub tag: String,
    pub role: String,
    pub badge_id: u64,
}

/// The player's reward-chest cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chests {
    /// The next chests the player will receive, in order.
    pub cycle: Vec<String>,
    /// The repeating definition of the whole cycle.
    pub fullcycle: Vec<String>,
    /// Chests until the next super magical chest.
    pub super_magical: u32,
    /// Chests until the next legendary chest.
    pub legendary: u32,
    /// Chests until the next epic chest.
    pub epic: u32,
}

impl PlayerSnapshot {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Percentage of games won, counting draws as half a win.
    pub fn win_ratio(&self) -> Option<f64> {
        let games =
            u64::from(self.wins) + u64::from(self.draws) + u64::from(self.losses);
        if games == 0 {
            return None;
        }
        let wins = f64::from(self.wins) + f64::from(self.draws) * 0.5;
        Some(wins / games as f64 * 100.0)
    }

    /// Experience in `current / total` form, e.g. `1,234 / 2,000`.
    pub fn experience_display(&self) -> String {
        let total = XP_LEVELS
            .get(self.level as usize)
            .map(|xp| group_thousands(*xp))
            .unwrap_or_else(|| "MAX".to_owned());
        format!("{} / {}", group_thousands(self.experience), total)
    }

    pub fn clan_badge_key(&self) -> Option<u64> {
        self.clan
            .as_ref()
            .map(|clan| clan.badge_id.saturating_sub(1) + BADGE_KEY_BASE)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = r#"{
        "username": "SML",
        "tag": "C0G20PR2",
        "trophies": { "current": 4321, "highest": 4500, "legend": 12 },
        "level": 10,
        "experience": 12345,
        "clan": { "name": "Reddit Alpha", "tag": "2CCCP", "role": "Leader", "badge_id": 57 },
        "chests": {
            "cycle": ["Silver", "Silver", "Gold"],
            "fullcycle": ["Silver", "Silver", "Giant", "Silver", "Magic"],
            "super_magical": 120,
            "legendary": 300,
            "epic": 7
        },
        "wins": 300,
        "losses": 200,
        "draws": 100,
        "three_crown_wins": 90,
        "cards_found": 72,
        "favorite_card": "Hog Rider",
        "rank": 17
    }"#;

    fn sample() -> PlayerSnapshot {
        PlayerSnapshot::from_json(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn parses_api_record() {
        let player = sample();
        assert_eq!(player.tag.as_str(), "C0G20PR2");
        assert_eq!(player.trophies.legend, 12);
        assert_eq!(player.chests.fullcycle.len(), 5);
        assert_eq!(player.gold, None);
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let broken = SAMPLE.replace("\"wins\": 300,", "");
        assert!(PlayerSnapshot::from_json(broken.as_bytes()).is_err());
        assert!(PlayerSnapshot::from_json(b"<html>502</html>").is_err());
    }

    #[test]
    fn win_ratio_counts_draws_as_half() {
        let ratio = sample().win_ratio().unwrap();
        assert!((ratio - 58.333).abs() < 0.001);

        let mut fresh = sample();
        fresh.wins = 0;
        fresh.losses = 0;
        fresh.draws = 0;
        assert_eq!(fresh.win_ratio(), None);
    }

    #[test]
    fn win_ratio_of_huge_counters() {
        let huge = SAMPLE
            .replace("\"wins\": 300,", "\"wins\": 4000000000,")
            .replace("\"losses\": 200,", "\"losses\": 300000000,")
            .replace("\"draws\": 100,", "\"draws\": 4294967295,");
        let player = PlayerSnapshot::from_json(huge.as_bytes()).unwrap();
        let ratio = player.win_ratio().unwrap();
        assert!(ratio > 0.0 && ratio < 100.0);
    }

    #[rstest]
    #[case(10, 12345, "12,345 / 30,000")]
    #[case(0, 5, "5 / 0")]
    #[case(13, 999999, "999,999 / MAX")]
    fn experience_display(
        #[case] level: u32,
        #[case] experience: u64,
        #[case] expected: &str,
    ) {
        let mut player = sample();
        player.level = level;
        player.experience = experience;
        assert_eq!(player.experience_display(), expected);
    }

    #[test]
    fn clan_badge_key() {
        let mut player = sample();
        assert_eq!(player.clan_badge_key(), Some(16_000_056));
        player.clan = None;
        assert_eq!(player.clan_badge_key(), None);
    }
}
