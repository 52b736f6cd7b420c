//! Steam Web API endpoint paths

/// User-facing Steam Web API endpoints
///
/// # Example
///
/// ```
/// use steam_api::Endpoint;
///
/// assert_eq!(
///     Endpoint::PlayerSummaries.as_path(),
///     "/ISteamUser/GetPlayerSummaries/v2/"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Vanity name to SteamID resolution
    ResolveVanityUrl,
    /// Bulk profile lookup
    PlayerSummaries,
    /// Relation list of an account
    FriendList,
    RecentlyPlayedGames,
    OwnedGames,
    SteamLevel,
    Badges,
    CommunityBadgeProgress,
    AccountPublicInfo,
    PlayerBans,
}

impl Endpoint {
    /// Path relative to the API origin
    #[must_use]
    pub fn as_path(&self) -> &'static str {
        match self {
            Self::ResolveVanityUrl => "/ISteamUser/ResolveVanityURL/v1/",
            Self::PlayerSummaries => "/ISteamUser/GetPlayerSummaries/v2/",
            Self::FriendList => "/ISteamUser/GetFriendList/v1/",
            Self::RecentlyPlayedGames => "/IPlayerService/GetRecentlyPlayedGames/v1/",
            Self::OwnedGames => "/IPlayerService/GetOwnedGames/v1/",
            Self::SteamLevel => "/IPlayerService/GetSteamLevel/v1/",
            Self::Badges => "/IPlayerService/GetBadges/v1/",
            Self::CommunityBadgeProgress => "/IPlayerService/GetCommunityBadgeProgress/v1",
            Self::AccountPublicInfo => "/IGameServersService/GetAccountPublicInfo/v1",
            Self::PlayerBans => "/ISteamUser/GetPlayerBans/v1",
        }
    }
}
