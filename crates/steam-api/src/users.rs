//! User endpoints of the Steam Web API

use crate::endpoints::Endpoint;
use crate::error::{Error, Operation, Result};
use crate::executor::RequestExecutor;
use crate::params::QueryParams;
use crate::types::{
    AccountPublicInfo, BadgeProgress, Badges, Envelope, FriendEntry, FriendListEnvelope,
    FriendsList, OwnedGames, PlayerBan, PlayerBans, PlayerSummaries, ProfileLookup,
    ProfileRecord, RecentlyPlayedGames, SteamLevel, UserSearch, VanityResolution,
    VanityResponse,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// User operations, borrowed from a [`SteamClient`](crate::SteamClient)
///
/// Every method wraps failures in [`Error::Operation`] tagged with the
/// operation that failed.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> Users<'a> {
    pub(crate) fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// Resolve a vanity name and fetch the matching profile
    ///
    /// An unknown name is not an error; the API's message is returned instead.
    pub async fn search_user(&self, vanity: &str) -> Result<UserSearch> {
        self.search(vanity)
            .await
            .map_err(|e| Error::wrap(Operation::SearchUser, e))
    }

    /// Resolve a vanity name to a SteamID
    pub async fn resolve_vanity_name(&self, vanity: &str) -> Result<VanityResolution> {
        self.resolve(vanity)
            .await
            .map_err(|e| Error::wrap(Operation::ResolveVanityName, e))
    }

    /// Fetch one profile, or several when `steam_ids` is comma delimited
    pub async fn fetch_profile(&self, steam_ids: &str) -> Result<ProfileLookup> {
        self.lookup(steam_ids)
            .await
            .map_err(|e| Error::wrap(Operation::FetchProfile, e))
    }

    /// Fetch several profiles in one request
    pub async fn fetch_profiles<S: AsRef<str>>(&self, steam_ids: &[S]) -> Result<ProfileLookup> {
        self.fetch_profile(&join_ids(steam_ids)).await
    }

    /// Fetch the friends of an account as full profiles
    ///
    /// Each profile carries the relationship and `friendsince` of its
    /// friend list entry.
    pub async fn fetch_friends(&self, steam_id: &str) -> Result<FriendsList> {
        self.friends(steam_id)
            .await
            .map_err(|e| Error::wrap(Operation::FetchFriends, e))
    }

    pub async fn fetch_recently_played(&self, steam_id: &str) -> Result<RecentlyPlayedGames> {
        self.unwrap_response(Endpoint::RecentlyPlayedGames, by_steam_id(steam_id))
            .await
            .map_err(|e| Error::wrap(Operation::FetchRecentlyPlayed, e))
    }

    /// Fetch owned games
    ///
    /// `include_app_info` adds names and icons; `include_free_games` adds
    /// free games that have been played.
    pub async fn fetch_owned_games(
        &self,
        steam_id: &str,
        include_app_info: bool,
        include_free_games: bool,
    ) -> Result<OwnedGames> {
        let params = by_steam_id(steam_id)
            .with("include_appinfo", include_app_info)
            .with("include_played_free_games", include_free_games);

        self.unwrap_response(Endpoint::OwnedGames, params)
            .await
            .map_err(|e| Error::wrap(Operation::FetchOwnedGames, e))
    }

    /// Fetch owned games including app info and played free games
    pub async fn fetch_all_owned_games(&self, steam_id: &str) -> Result<OwnedGames> {
        self.fetch_owned_games(steam_id, true, true).await
    }

    pub async fn fetch_steam_level(&self, steam_id: &str) -> Result<SteamLevel> {
        self.unwrap_response(Endpoint::SteamLevel, by_steam_id(steam_id))
            .await
            .map_err(|e| Error::wrap(Operation::FetchSteamLevel, e))
    }

    pub async fn fetch_badges(&self, steam_id: &str) -> Result<Badges> {
        self.unwrap_response(Endpoint::Badges, by_steam_id(steam_id))
            .await
            .map_err(|e| Error::wrap(Operation::FetchBadges, e))
    }

    /// Fetch quest progress of a community badge
    pub async fn fetch_badge_progress(
        &self,
        steam_id: &str,
        badge_id: u32,
    ) -> Result<BadgeProgress> {
        let params = by_steam_id(steam_id).with("badgeid", badge_id);
        self.unwrap_response(Endpoint::CommunityBadgeProgress, params)
            .await
            .map_err(|e| Error::wrap(Operation::FetchBadgeProgress, e))
    }

    pub async fn fetch_account_public_info(&self, steam_id: &str) -> Result<AccountPublicInfo> {
        self.unwrap_response(Endpoint::AccountPublicInfo, by_steam_id(steam_id))
            .await
            .map_err(|e| Error::wrap(Operation::FetchAccountPublicInfo, e))
    }

    /// Fetch ban records; `steam_ids` may be comma delimited
    pub async fn fetch_bans(&self, steam_ids: &str) -> Result<Vec<PlayerBan>> {
        let params = QueryParams::new().with("steamids", steam_ids);
        self.executor
            .get_json::<PlayerBans>(Endpoint::PlayerBans, &params)
            .await
            .map(|bans| bans.players)
            .map_err(|e| Error::wrap(Operation::FetchBans, e))
    }

    async fn search(&self, vanity: &str) -> Result<UserSearch> {
        match self.resolve(vanity).await? {
            VanityResolution::Resolved { steam_id } => {
                Ok(UserSearch::Found(self.lookup(&steam_id).await?))
            }
            VanityResolution::Unresolved { message } => Ok(UserSearch::Unresolved { message }),
        }
    }

    async fn friends(&self, steam_id: &str) -> Result<FriendsList> {
        let relations: FriendListEnvelope = self
            .executor
            .get_json(Endpoint::FriendList, &by_steam_id(steam_id))
            .await?;
        let relations = relations.friends_list.friends;

        if relations.is_empty() {
            return Ok(FriendsList {
                friends: Vec::new(),
            });
        }

        debug!("Fetching {} friend profiles for {}", relations.len(), steam_id);
        let ids: Vec<&str> = relations.iter().map(|f| f.steam_id.as_str()).collect();
        let profiles = self.lookup(&join_ids(&ids)).await?.into_records();

        Ok(FriendsList {
            friends: merge_relations(profiles, &relations)?,
        })
    }

    async fn resolve(&self, vanity: &str) -> Result<VanityResolution> {
        let params = QueryParams::new().with("vanityurl", vanity);
        let response: VanityResponse = self
            .unwrap_response(Endpoint::ResolveVanityUrl, params)
            .await?;
        VanityResolution::try_from(response)
    }

    async fn lookup(&self, steam_ids: &str) -> Result<ProfileLookup> {
        let params = QueryParams::new().with("steamids", steam_ids);
        let summaries: PlayerSummaries = self
            .unwrap_response(Endpoint::PlayerSummaries, params)
            .await?;
        ProfileLookup::from_records(summaries.players)
    }

    async fn unwrap_response<T>(&self, endpoint: Endpoint, params: QueryParams) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let envelope: Envelope<T> = self.executor.get_json(endpoint, &params).await?;
        Ok(envelope.response)
    }
}

fn by_steam_id(steam_id: &str) -> QueryParams {
    QueryParams::new().with("steamid", steam_id)
}

fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| id.as_ref())
        .collect::<Vec<&str>>()
        .join(",")
}

/// Attach relation metadata to bulk-fetched profiles, matching by SteamID
///
/// Profiles keep the order the bulk fetch returned them in. Every relation
/// must have exactly one profile and every profile a relation.
pub(crate) fn merge_relations(
    profiles: Vec<ProfileRecord>,
    relations: &[FriendEntry],
) -> Result<Vec<ProfileRecord>> {
    let by_id: HashMap<&str, &FriendEntry> = relations
        .iter()
        .map(|entry| (entry.steam_id.as_str(), entry))
        .collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(profiles.len());

    let mut merged = Vec::with_capacity(profiles.len());
    for mut profile in profiles {
        let Some(&entry) = by_id.get(profile.steam_id.as_str()) else {
            return Err(Error::unrelated_profile(profile.steam_id));
        };
        if !seen.insert(entry.steam_id.as_str()) {
            return Err(Error::duplicate_profile(profile.steam_id));
        }
        profile.relationship = Some(entry.relationship.clone());
        profile.friend_since = Some(entry.friend_since);
        merged.push(profile);
    }

    if let Some(missing) = relations
        .iter()
        .find(|entry| !seen.contains(entry.steam_id.as_str()))
    {
        return Err(Error::friend_profile_missing(&missing.steam_id));
    }

    Ok(merged)
}
