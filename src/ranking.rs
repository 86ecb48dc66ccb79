//! Tier ordering and ranked queue kinds.

use std::fmt;

pub const UNRANKED: &str = "UNRANKED";

/// Best to worst.
const TIER_ORDER: [&str; 11] = [
    "CHALLENGER",
    "GRANDMASTER",
    "MASTER",
    "DIAMOND",
    "EMERALD",
    "PLATINUM",
    "GOLD",
    "SILVER",
    "BRONZE",
    "IRON",
    UNRANKED,
];

/// Position given to tiers we do not recognise. It sorts below `UNRANKED`,
/// so an unknown tier never becomes a peak.
const UNKNOWN_TIER_POSITION: usize = 99;

/// Position of `tier` in the ladder, 0 being the best.
pub fn tier_position(tier: &str) -> usize {
    TIER_ORDER
        .iter()
        .position(|known| *known == tier)
        .unwrap_or(UNKNOWN_TIER_POSITION)
}

/// `true` when `candidate` is strictly better than `current`.
pub fn is_higher(candidate: &str, current: &str) -> bool {
    tier_position(candidate) < tier_position(current)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueType {
    /// Ranked Solo/Duo
    SoloDuo,
    /// Ranked Flex
    Flex,
}

impl QueueType {
    pub const ALL: [QueueType; 2] = [Self::SoloDuo, Self::Flex];

    /// Value of `queueType` in league-v4 entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoloDuo => "RANKED_SOLO_5x5",
            Self::Flex => "RANKED_FLEX_SR",
        }
    }

    /// Returns `None` for queues we do not track (TFT, Arena, ...).
    pub fn from_league(queue_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == queue_type)
    }

    /// Prefix of this queue's columns in storage.
    pub(crate) fn column_prefix(&self) -> &'static str {
        match self {
            Self::SoloDuo => "solo",
            Self::Flex => "flex",
        }
    }
}

impl fmt::Display for QueueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SoloDuo => f.write_str("Solo/Duo"),
            Self::Flex => f.write_str("Flex"),
        }
    }
}
