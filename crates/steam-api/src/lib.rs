//! Typed client for the Steam Web API
//!
//! This crate wraps the user-facing Steam Web API endpoints (profiles,
//! friends, games, badges and bans) behind typed async methods. Requests are
//! retried immediately on transport errors, non-2xx statuses and unparsable
//! bodies, up to a configurable number of attempts.
//!
//! # Example
//!
//! ```no_run
//! use steam_api::SteamClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SteamClient::new("YOUR_API_KEY")?;
//!
//!     let friends = client.users().fetch_friends("76561198995017863").await?;
//!     for friend in &friends.friends {
//!         println!("{} since {:?}", friend.persona_name, friend.friend_since);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod params;
pub mod types;
pub mod users;

pub use client::SteamClient;
pub use config::{ApiKey, ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS};
pub use endpoints::Endpoint;
pub use error::{Error, Operation, Result};
pub use executor::{ApiResponse, EMPTY_BODY_SENTINEL, RequestExecutor};
pub use params::{QueryParams, QueryValue};
pub use types::{
    AccountPublicInfo, BadgeProgress, Badges, FriendsList, OwnedGames, PlayerBan, ProfileLookup,
    ProfileRecord, RecentlyPlayedGames, Relationship, SteamLevel, UserSearch, VanityResolution,
};
pub use users::Users;
