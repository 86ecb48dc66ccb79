use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use tracing::info;

use crate::error::AppError;
use crate::ranking::{self, QueueType, UNRANKED};
use crate::riot::{LeagueEntryDto, Region};

/// Standing in one ranked queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRecord {
    pub tier: String,
    pub division: Option<String>,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub league_id: Option<String>,
    /// Best tier ever observed; survives resets of the fields above.
    pub highest_achieved_tier: String,
}

impl Default for QueueRecord {
    fn default() -> Self {
        Self {
            tier: UNRANKED.to_string(),
            division: None,
            league_points: 0,
            wins: 0,
            losses: 0,
            league_id: None,
            highest_achieved_tier: UNRANKED.to_string(),
        }
    }
}

impl QueueRecord {
    /// Back to the unranked baseline, keeping the peak.
    pub fn reset_current(&mut self) {
        *self = Self {
            highest_achieved_tier: std::mem::take(&mut self.highest_achieved_tier),
            ..Self::default()
        };
    }

    /// Copy the entry into the current fields and raise the peak if the
    /// entry's tier beats it. Returns whether the peak moved.
    pub fn apply_entry(&mut self, entry: &LeagueEntryDto) -> bool {
        self.tier = entry.tier.clone();
        self.division = Some(entry.rank.clone());
        self.league_points = entry.league_points;
        self.wins = entry.wins;
        self.losses = entry.losses;
        self.league_id = Some(entry.league_id.clone());

        if ranking::is_higher(&entry.tier, &self.highest_achieved_tier) {
            self.highest_achieved_tier = entry.tier.clone();
            return true;
        }
        false
    }

    pub fn is_ranked(&self) -> bool {
        self.tier != UNRANKED
    }

    fn from_row(row: &SqliteRow, queue: QueueType) -> Result<Self, sqlx::Error> {
        let q = queue.column_prefix();
        Ok(Self {
            tier: row.try_get(format!("current_{q}_tier").as_str())?,
            division: row.try_get(format!("current_{q}_division").as_str())?,
            league_points: row.try_get(format!("current_{q}_lp").as_str())?,
            wins: row.try_get(format!("{q}_wins").as_str())?,
            losses: row.try_get(format!("{q}_losses").as_str())?,
            league_id: row.try_get(format!("{q}_league_id").as_str())?,
            highest_achieved_tier: row.try_get(format!("highest_achieved_tier_{q}").as_str())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummonerProfile {
    pub id: i64,
    pub discord_id: String,
    pub summoner_name: String,
    pub tagline: String,
    /// Anchor identity, never replaced once stored.
    pub puuid: String,
    pub summoner_id: String,
    /// Region code, see [`Region::code`].
    pub server_region: String,
    pub profile_icon_id: i32,
    pub summoner_level: i64,
    pub solo: QueueRecord,
    pub flex: QueueRecord,
    pub last_check_timestamp: DateTime<Utc>,
    pub is_active: bool,
}

impl SummonerProfile {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.summoner_name, self.tagline)
    }

    pub fn region(&self) -> Result<Region, AppError> {
        self.server_region.parse()
    }

    pub fn queue(&self, queue: QueueType) -> &QueueRecord {
        match queue {
            QueueType::SoloDuo => &self.solo,
            QueueType::Flex => &self.flex,
        }
    }

    pub fn queue_mut(&mut self, queue: QueueType) -> &mut QueueRecord {
        match queue {
            QueueType::SoloDuo => &mut self.solo,
            QueueType::Flex => &mut self.flex,
        }
    }

    /// Merge a fresh set of league entries. Queues without an entry are reset
    /// to the unranked baseline; peaks only ever move up.
    pub fn apply_league_entries(&mut self, entries: &[LeagueEntryDto]) {
        for queue in QueueType::ALL {
            let entry = entries
                .iter()
                .find(|e| QueueType::from_league(&e.queue_type) == Some(queue));
            let record = self.queue_mut(queue);

            let Some(entry) = entry else {
                record.reset_current();
                continue;
            };

            if record.apply_entry(entry) {
                info!(
                    discord_id = %self.discord_id,
                    queue = %queue,
                    tier = %entry.tier,
                    "🏆 New peak tier reached"
                );
            }
        }
    }
}

impl<'r> FromRow<'r, SqliteRow> for SummonerProfile {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            discord_id: row.try_get("discord_id")?,
            summoner_name: row.try_get("summoner_name")?,
            tagline: row.try_get("tagline")?,
            puuid: row.try_get("puuid")?,
            summoner_id: row.try_get("summoner_id")?,
            server_region: row.try_get("server_region")?,
            profile_icon_id: row.try_get("profile_icon_id")?,
            summoner_level: row.try_get("summoner_level")?,
            solo: QueueRecord::from_row(row, QueueType::SoloDuo)?,
            flex: QueueRecord::from_row(row, QueueType::Flex)?,
            last_check_timestamp: row.try_get("last_check_timestamp")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

/// Values used when a profile does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub summoner_name: String,
    pub tagline: String,
    pub puuid: String,
    pub summoner_id: String,
    pub server_region: Region,
    pub profile_icon_id: i32,
    pub summoner_level: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(queue: QueueType, tier: &str, lp: i32) -> LeagueEntryDto {
        LeagueEntryDto {
            league_id: format!("{tier}-league"),
            queue_type: queue.as_str().to_string(),
            tier: tier.to_string(),
            rank: "II".to_string(),
            league_points: lp,
            wins: 10,
            losses: 8,
            veteran: false,
            inactive: false,
            fresh_blood: false,
            hot_streak: false,
        }
    }

    fn profile() -> SummonerProfile {
        SummonerProfile {
            id: 1,
            discord_id: "42".into(),
            summoner_name: "Faker".into(),
            tagline: "KR1".into(),
            puuid: "P1".into(),
            summoner_id: "S1".into(),
            server_region: "KR".into(),
            profile_icon_id: 6,
            summoner_level: 812,
            solo: QueueRecord::default(),
            flex: QueueRecord::default(),
            last_check_timestamp: Utc::now(),
            is_active: true,
        }
    }

    #[test]
    fn reset_keeps_peak() {
        let mut record = QueueRecord::default();
        record.apply_entry(&entry(QueueType::SoloDuo, "DIAMOND", 40));

        record.reset_current();

        assert_eq!(record.tier, UNRANKED);
        assert_eq!(record.division, None);
        assert_eq!(record.league_points, 0);
        assert_eq!(record.league_id, None);
        assert_eq!(record.highest_achieved_tier, "DIAMOND");
    }

    #[test]
    fn lower_tier_does_not_lower_peak() {
        let mut record = QueueRecord::default();
        assert!(record.apply_entry(&entry(QueueType::Flex, "GOLD", 10)));
        assert!(!record.apply_entry(&entry(QueueType::Flex, "SILVER", 90)));

        assert_eq!(record.tier, "SILVER");
        assert_eq!(record.league_points, 90);
        assert_eq!(record.highest_achieved_tier, "GOLD");
    }

    #[test]
    fn queues_are_merged_independently() {
        let mut profile = profile();
        profile.flex.highest_achieved_tier = "EMERALD".into();
        profile.flex.tier = "EMERALD".into();

        profile.apply_league_entries(&[
            entry(QueueType::SoloDuo, "MASTER", 120),
            LeagueEntryDto {
                queue_type: "CHERRY".into(),
                ..entry(QueueType::SoloDuo, "GOLD", 1)
            },
        ]);

        assert_eq!(profile.solo.tier, "MASTER");
        assert_eq!(profile.solo.league_points, 120);
        assert_eq!(profile.solo.highest_achieved_tier, "MASTER");
        assert_eq!(profile.flex.tier, UNRANKED);
        assert_eq!(profile.flex.highest_achieved_tier, "EMERALD");
    }

    #[test]
    fn riot_id_and_region() {
        let profile = profile();
        assert_eq!(profile.riot_id(), "Faker#KR1");
        assert_eq!(profile.region().unwrap(), Region::Kr);
    }
}
