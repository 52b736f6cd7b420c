//! Typed response schemas for the Steam Web API

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{"response": T}` wrapper used by most endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

/// Community profile visibility as reported by `communityvisibilitystate`
pub const VISIBILITY_PUBLIC: u8 = 3;

/// Relationship tag attached by the friend list endpoint
///
/// Values without a dedicated variant are kept verbatim so they serialize
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relationship {
    Friend,
    All,
    Other(String),
}

impl Relationship {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Friend => "friend",
            Self::All => "all",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for Relationship {
    fn from(value: String) -> Self {
        match value.as_str() {
            "friend" => Self::Friend,
            "all" => Self::All,
            _ => Self::Other(value),
        }
    }
}

impl From<Relationship> for String {
    fn from(relationship: Relationship) -> Self {
        match relationship {
            Relationship::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Normalized profile of a single account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(rename = "personaname", default)]
    pub persona_name: String,
    #[serde(rename = "communityvisibilitystate", default)]
    pub visibility_state: u8,
    #[serde(rename = "profilestate", default, skip_serializing_if = "Option::is_none")]
    pub profile_state: Option<u8>,
    #[serde(rename = "profileurl", default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(rename = "avatarfull", default, skip_serializing_if = "Option::is_none")]
    pub avatar_full: Option<String>,
    #[serde(rename = "personastate", default, skip_serializing_if = "Option::is_none")]
    pub persona_state: Option<u8>,
    #[serde(rename = "lastlogoff", default, skip_serializing_if = "Option::is_none")]
    pub last_logoff: Option<u64>,
    #[serde(rename = "realname", default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(rename = "timecreated", default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<u64>,
    #[serde(rename = "loccountrycode", default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(rename = "gameid", default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(rename = "gameextrainfo", default, skip_serializing_if = "Option::is_none")]
    pub game_extra_info: Option<String>,
    /// Set when the record comes from a friend list merge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
    /// Unix time the friendship was established; set alongside `relationship`
    #[serde(rename = "friendsince", default, skip_serializing_if = "Option::is_none")]
    pub friend_since: Option<u64>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileRecord {
    pub fn is_public(&self) -> bool {
        self.visibility_state == VISIBILITY_PUBLIC
    }
}

/// Payload of `GetPlayerSummaries`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerSummaries {
    #[serde(default)]
    pub players: Vec<ProfileRecord>,
}

/// Result of a profile lookup
///
/// Serializes as `{"player": ...}` for one record and `{"players": [...]}`
/// for several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileLookup {
    Single { player: ProfileRecord },
    Many { players: Vec<ProfileRecord> },
}

impl ProfileLookup {
    /// Shape a bulk fetch result; no records is an error
    pub fn from_records(mut records: Vec<ProfileRecord>) -> Result<Self> {
        match records.len() {
            0 => Err(Error::ProfileNotFound),
            1 => Ok(Self::Single {
                player: records.remove(0),
            }),
            _ => Ok(Self::Many { players: records }),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Many { players } => players.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Vec<ProfileRecord> {
        match self {
            Self::Single { player } => vec![player],
            Self::Many { players } => players,
        }
    }
}

/// Raw `ResolveVanityURL` payload
#[derive(Debug, Clone, Deserialize)]
pub struct VanityResponse {
    pub success: u8,
    #[serde(rename = "steamid", default)]
    pub steam_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a vanity name lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VanityResolution {
    Resolved { steam_id: String },
    /// The API declined; carries its message
    Unresolved { message: String },
}

impl TryFrom<VanityResponse> for VanityResolution {
    type Error = Error;

    fn try_from(response: VanityResponse) -> Result<Self> {
        if response.success != 1 {
            return Ok(Self::Unresolved {
                message: response.message.unwrap_or_default(),
            });
        }

        match response.steam_id {
            Some(steam_id) => Ok(Self::Resolved { steam_id }),
            None => Err(Error::unexpected_shape(
                <serde_json::Error as serde::de::Error>::missing_field("steamid"),
            )),
        }
    }
}

/// Outcome of a user search by vanity name
#[derive(Debug, Clone, PartialEq)]
pub enum UserSearch {
    Found(ProfileLookup),
    Unresolved { message: String },
}

/// Entry of the relation list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FriendEntry {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    pub relationship: Relationship,
    pub friend_since: u64,
}

/// Payload of `GetFriendList`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FriendList {
    #[serde(default)]
    pub friends: Vec<FriendEntry>,
}

/// `{"friendslist": ...}` wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct FriendListEnvelope {
    #[serde(rename = "friendslist", default)]
    pub friends_list: FriendList,
}

/// Friend profiles with relationship metadata merged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendsList {
    pub friends: Vec<ProfileRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentGame {
    pub appid: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub playtime_2weeks: u64,
    #[serde(default)]
    pub playtime_forever: u64,
    #[serde(default)]
    pub img_icon_url: Option<String>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `GetRecentlyPlayedGames`
///
/// Private profiles come back empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentlyPlayedGames {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub games: Vec<RecentGame>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub appid: u32,
    /// Only present with `include_appinfo`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub playtime_forever: u64,
    #[serde(default)]
    pub img_icon_url: Option<String>,
    #[serde(default)]
    pub has_community_visible_stats: Option<bool>,
    #[serde(default)]
    pub rtime_last_played: Option<u64>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `GetOwnedGames`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnedGames {
    #[serde(default)]
    pub game_count: u32,
    #[serde(default)]
    pub games: Vec<OwnedGame>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `GetSteamLevel`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteamLevel {
    #[serde(default)]
    pub player_level: Option<u32>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub badgeid: u32,
    #[serde(default)]
    pub appid: Option<u32>,
    pub level: u32,
    pub completion_time: u64,
    pub xp: u32,
    pub scarcity: u64,
    #[serde(default)]
    pub communityitemid: Option<String>,
    #[serde(default)]
    pub border_color: Option<u32>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `GetBadges`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Badges {
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub player_xp: u32,
    #[serde(default)]
    pub player_level: u32,
    #[serde(default)]
    pub player_xp_needed_to_level_up: u32,
    #[serde(default)]
    pub player_xp_needed_current_level: u32,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub questid: u32,
    pub completed: bool,
}

/// Payload of `GetCommunityBadgeProgress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeProgress {
    #[serde(default)]
    pub quests: Vec<Quest>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `GetAccountPublicInfo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountPublicInfo {
    #[serde(rename = "steamid", default)]
    pub steam_id: Option<String>,
    #[serde(default)]
    pub appid: Option<u32>,
    /// Any other fields the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ban record of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerBan {
    pub steam_id: String,
    pub community_banned: bool,
    #[serde(rename = "VACBanned")]
    pub vac_banned: bool,
    #[serde(rename = "NumberOfVACBans")]
    pub number_of_vac_bans: u32,
    pub days_since_last_ban: u32,
    pub number_of_game_bans: u32,
    pub economy_ban: String,
}

/// `GetPlayerBans` response; this endpoint has no `response` envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerBans {
    #[serde(default)]
    pub players: Vec<PlayerBan>,
}
