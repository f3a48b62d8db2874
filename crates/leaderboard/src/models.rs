use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction in which members are ranked.
///
/// `Ascending` puts the lowest score at rank 1, `Descending` the highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("ascending"),
            SortOrder::Descending => f.write_str("descending"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => anyhow::bail!("Unknown sort order '{}' (expected asc or desc)", other),
        }
    }
}

/// A member together with its current score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberScore {
    pub member: String,
    pub score: f64,
}

impl MemberScore {
    pub fn new(member: impl Into<String>, score: f64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}

/// Rank and score of one member, read at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankWithScore {
    /// 1-based.
    pub rank: u64,
    pub score: f64,
}

/// A member as it appears on a page of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMember {
    /// 1-based.
    pub rank: u64,
    pub member: String,
    pub score: f64,
}
