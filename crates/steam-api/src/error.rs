//! Error types for the Steam Web API client

use std::fmt;
use thiserror::Error;

/// Public operation that produced a wrapped error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SearchUser,
    ResolveVanityName,
    FetchProfile,
    FetchFriends,
    FetchRecentlyPlayed,
    FetchOwnedGames,
    FetchSteamLevel,
    FetchBadges,
    FetchBadgeProgress,
    FetchAccountPublicInfo,
    FetchBans,
}

impl Operation {
    /// Human readable phrase used in wrapped error messages
    pub fn describe(self) -> &'static str {
        match self {
            Self::SearchUser => "searching user",
            Self::ResolveVanityName => "resolving vanity URL",
            Self::FetchProfile => "getting user details",
            Self::FetchFriends => "getting user friends list",
            Self::FetchRecentlyPlayed => "getting recently played games",
            Self::FetchOwnedGames => "getting owned games",
            Self::FetchSteamLevel => "getting user Steam level",
            Self::FetchBadges => "getting user Steam badges",
            Self::FetchBadgeProgress => "getting user community badge progress",
            Self::FetchAccountPublicInfo => "getting account public info",
            Self::FetchBans => "getting player bans info",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    // Request failures, retried by the executor
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP Error! Status: {status}")]
    HttpStatus { status: reqwest::StatusCode },

    #[error("Failed to parse JSON response: {source}")]
    MalformedResponse { source: serde_json::Error },

    // Response shape errors
    #[error("User not found")]
    ProfileNotFound,

    #[error("No profile returned for friend {steam_id}")]
    FriendProfileMissing { steam_id: String },

    #[error("Profile {steam_id} is not in the friend list")]
    UnrelatedProfile { steam_id: String },

    #[error("Profile {steam_id} returned more than once")]
    DuplicateProfile { steam_id: String },

    #[error("Unexpected response shape: {source}")]
    UnexpectedShape { source: serde_json::Error },

    #[error("Expected a JSON payload but the response body was empty")]
    UnexpectedEmptyBody,

    // Configuration errors
    #[error("Failed to build HTTP client: {source}")]
    ClientBuild { source: reqwest::Error },

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header: {name}")]
    InvalidHeader { name: String },

    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid value for {variable}: {value}")]
    InvalidConfig { variable: &'static str, value: String },

    #[error("Error {operation}: {source}")]
    Operation {
        operation: Operation,
        source: Box<Error>,
    },
}

impl Error {
    /// Create an HTTP status error
    pub fn http_status(status: reqwest::StatusCode) -> Self {
        Self::HttpStatus { status }
    }

    /// Create a malformed response error from a JSON parse failure
    pub fn malformed_response(source: serde_json::Error) -> Self {
        Self::MalformedResponse { source }
    }

    /// Create an unexpected shape error from a schema mismatch
    pub fn unexpected_shape(source: serde_json::Error) -> Self {
        Self::UnexpectedShape { source }
    }

    /// Create a missing friend profile error
    pub fn friend_profile_missing(steam_id: impl Into<String>) -> Self {
        Self::FriendProfileMissing {
            steam_id: steam_id.into(),
        }
    }

    /// Create an unrelated profile error
    pub fn unrelated_profile(steam_id: impl Into<String>) -> Self {
        Self::UnrelatedProfile {
            steam_id: steam_id.into(),
        }
    }

    /// Create a duplicate friend profile error
    pub fn duplicate_profile(steam_id: impl Into<String>) -> Self {
        Self::DuplicateProfile {
            steam_id: steam_id.into(),
        }
    }

    /// Create a client construction error
    pub fn client_build(source: reqwest::Error) -> Self {
        Self::ClientBuild { source }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(variable: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidConfig {
            variable,
            value: value.into(),
        }
    }

    /// Tag an error with the public operation it escaped from
    pub fn wrap(operation: Operation, source: Self) -> Self {
        Self::Operation {
            operation,
            source: Box::new(source),
        }
    }

    /// Check if the executor should retry after this error
    ///
    /// Every non-2xx status counts, 4xx included.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::MalformedResponse { .. }
        )
    }

    /// The error underneath any operation wrappers
    pub fn root(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// The outermost operation tag, if any
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// HTTP status carried by the root error, if any
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self.root() {
            Self::HttpStatus { status } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
