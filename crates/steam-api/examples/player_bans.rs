//! Look up ban records and the friend list of an account
//!
//! Reads the API key from `STEAM_API_KEY`:
//!
//! ```text
//! STEAM_API_KEY=... cargo run --example player_bans -- 76561198995017863
//! ```

use steam_api::SteamClient;
use tracing_subscriber::EnvFilter;

const DEFAULT_STEAM_ID: &str = "76561198995017863";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let steam_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_STEAM_ID.to_string());

    let client = SteamClient::from_env()?;
    let users = client.users();

    for ban in users.fetch_bans(&steam_id).await? {
        println!(
            "{}: VAC banned: {} ({} bans), game bans: {}, economy: {}",
            ban.steam_id,
            ban.vac_banned,
            ban.number_of_vac_bans,
            ban.number_of_game_bans,
            ban.economy_ban
        );
    }

    match users.fetch_friends(&steam_id).await {
        Ok(list) => {
            println!("\n{} friends:", list.friends.len());
            for friend in list.friends {
                println!(
                    "  {} ({}) since {}",
                    friend.persona_name,
                    friend.steam_id,
                    friend.friend_since.unwrap_or_default()
                );
            }
        }
        // Private friend lists answer 401
        Err(e) => println!("\nFriend list unavailable: {e}"),
    }

    Ok(())
}
