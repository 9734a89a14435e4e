use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const POLL_PERIOD_MS: u64 = 1000;

/// Team assignment as the service reports it, serialized as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Team {
    Spectator,
    Unassigned,
    Blu,
    Red,
}

impl From<Team> for u8 {
    fn from(team: Team) -> u8 {
        team as u8
    }
}

impl TryFrom<u8> for Team {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Team::Spectator),
            1 => Ok(Team::Unassigned),
            2 => Ok(Team::Blu),
            3 => Ok(Team::Red),
            other => Err(format!("invalid team ordinal: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ProfileVisibility {
    Private = 1,
    FriendsOnly = 2,
    Public = 3,
}

impl From<ProfileVisibility> for u8 {
    fn from(visibility: ProfileVisibility) -> u8 {
        visibility as u8
    }
}

impl TryFrom<u8> for ProfileVisibility {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ProfileVisibility::Private),
            2 => Ok(ProfileVisibility::FriendsOnly),
            3 => Ok(ProfileVisibility::Public),
            other => Err(format!("invalid visibility: {other}")),
        }
    }
}

/// One reason a player was flagged by the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub origin: String,
    pub attributes: Vec<String>,
    pub matcher_type: String,
}

/// Full snapshot of a tracked participant. The service sends these wholesale
/// on every poll; the client never constructs or partially mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub steam_id: u64,
    pub name: String,
    pub name_previous: String,
    pub real_name: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub profile_updated_on: DateTime<Utc>,
    pub account_created_on: DateTime<Utc>,
    pub team: Team,
    pub visibility: ProfileVisibility,
    pub avatar_hash: String,
    pub notes: String,
    pub whitelisted: bool,
    pub community_banned: bool,
    pub economy_ban: bool,
    pub number_of_vac_bans: u32,
    pub last_vac_ban_on: Option<DateTime<Utc>>,
    pub number_of_game_bans: u32,
    pub connected: f64,
    pub user_id: i64,
    pub ping: u32,
    pub kills: u32,
    pub deaths: u32,
    pub kills_on: u32,
    pub deaths_by: u32,
    pub rage_quits: u32,
    pub our_friend: bool,
    pub matches: Vec<Match>,
}

/// Operator-local configuration persisted by the panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub kick_tags: Vec<String>,
    pub kicker_enabled: bool,
    pub chat_warnings_enabled: bool,
    pub party_warnings_enabled: bool,
    pub discord_presence_enabled: bool,
}

impl UserSettings {
    /// Adds a kick tag, deduplicating case-insensitively (the newest casing
    /// wins) and keeping the list sorted under case-insensitive order.
    pub fn add_kick_tag(&mut self, tag: &str) {
        let existing = std::mem::take(&mut self.kick_tags);
        let mut merged = uniq_ci(existing.into_iter().chain(std::iter::once(tag.to_owned())));
        merged.sort_by_key(|t| t.to_lowercase());
        self.kick_tags = merged;
    }
}

/// A tag is committable when non-empty and free of whitespace.
pub fn valid_tag(tag: &str) -> bool {
    !tag.is_empty() && !tag.chars().any(char::is_whitespace)
}

/// Case-insensitive dedup preserving first-seen position; a later duplicate
/// replaces the stored casing.
pub fn uniq_ci<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        let key = tag.to_lowercase();
        match unique.iter_mut().find(|t| t.to_lowercase() == key) {
            Some(existing) => *existing = tag,
            None => unique.push(tag),
        }
    }
    unique
}

/// Formats a connected duration the way the panel displays it, e.g.
/// 45 -> "0:45", 3725 -> "1:02:05".
pub fn format_seconds(seconds: f64) -> String {
    let h = (seconds / 3600.0).floor() as u64;
    let m = ((seconds % 3600.0) / 60.0).floor() as u64;
    let s = (seconds % 60.0).round() as u64;

    let minutes = if m > 9 {
        m.to_string()
    } else if h > 0 {
        format!("0{m}")
    } else {
        m.to_string()
    };
    let secs = if s > 9 { s.to_string() } else { format!("0{s}") };

    let mut parts = Vec::new();
    if h > 0 {
        parts.push(h.to_string());
    }
    parts.push(minutes);
    parts.push(secs);
    parts.join(":")
}
