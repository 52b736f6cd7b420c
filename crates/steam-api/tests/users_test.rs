//! Integration tests for the user endpoints
//!
//! These tests verify request shaping and response reshaping against mock
//! Steam Web API responses.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use steam_api::{
    ApiKey, ClientConfig, Error, Operation, ProfileLookup, Relationship, SteamClient, UserSearch,
    VanityResolution,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUMMARIES: &str = "/ISteamUser/GetPlayerSummaries/v2/";
const FRIEND_LIST: &str = "/ISteamUser/GetFriendList/v1/";
const VANITY: &str = "/ISteamUser/ResolveVanityURL/v1/";

fn client_for(server: &MockServer) -> SteamClient {
    let config = ClientConfig::new(ApiKey::new("K").unwrap())
        .with_base_url(server.uri())
        .with_max_attempts(2);
    SteamClient::with_config(config).unwrap()
}

fn player(steam_id: &str, name: &str) -> Value {
    json!({
        "steamid": steam_id,
        "personaname": name,
        "communityvisibilitystate": 3,
        "profileurl": format!("https://steamcommunity.com/profiles/{steam_id}/"),
    })
}

fn summaries(players: Vec<Value>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"response": {"players": players}}))
}

async fn mount_summaries(server: &MockServer, steam_ids: &str, players: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .and(query_param("steamids", steam_ids))
        .respond_with(summaries(players))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_profile_single() {
    let mock_server = MockServer::start().await;
    mount_summaries(&mock_server, "1", vec![player("1", "one")]).await;

    let lookup = client_for(&mock_server)
        .users()
        .fetch_profile("1")
        .await
        .unwrap();

    match lookup {
        ProfileLookup::Single { player } => {
            assert_eq!(player.steam_id, "1");
            assert_eq!(player.persona_name, "one");
        }
        other => panic!("expected a single record, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_profiles_many() {
    let mock_server = MockServer::start().await;
    mount_summaries(
        &mock_server,
        "1,2",
        vec![player("1", "one"), player("2", "two")],
    )
    .await;

    let lookup = client_for(&mock_server)
        .users()
        .fetch_profiles(&["1", "2"])
        .await
        .unwrap();

    assert!(matches!(lookup, ProfileLookup::Many { ref players } if players.len() == 2));
}

#[tokio::test]
async fn test_fetch_profile_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .respond_with(summaries(vec![]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .users()
        .fetch_profile("404")
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::FetchProfile));
    assert!(matches!(err.root(), Error::ProfileNotFound));
    assert_eq!(err.to_string(), "Error getting user details: User not found");
    mock_server.verify().await;
}

#[tokio::test]
async fn test_fetch_friends_merges_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FRIEND_LIST))
        .and(query_param("steamid", "me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "friendslist": {"friends": [
                {"steamid": "A", "relationship": "friend", "friend_since": 100},
                {"steamid": "B", "relationship": "friend", "friend_since": 200}
            ]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Bulk fetch answers in the opposite order
    mount_summaries(
        &mock_server,
        "A,B",
        vec![player("B", "bee"), player("A", "ay")],
    )
    .await;

    let list = client_for(&mock_server)
        .users()
        .fetch_friends("me")
        .await
        .unwrap();

    assert_eq!(list.friends.len(), 2);
    for friend in &list.friends {
        let expected = if friend.steam_id == "A" { 100 } else { 200 };
        assert_eq!(friend.friend_since, Some(expected));
        assert_eq!(friend.relationship, Some(Relationship::Friend));
    }

    let value = serde_json::to_value(&list).unwrap();
    assert_eq!(value["friends"][0]["steamid"], json!("B"));
    assert_eq!(value["friends"][0]["friendsince"], json!(200));
    assert_eq!(value["friends"][0]["relationship"], json!("friend"));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_fetch_friends_single_friend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FRIEND_LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "friendslist": {"friends": [
                {"steamid": "A", "relationship": "friend", "friend_since": 42}
            ]}
        })))
        .mount(&mock_server)
        .await;
    mount_summaries(&mock_server, "A", vec![player("A", "ay")]).await;

    let list = client_for(&mock_server)
        .users()
        .fetch_friends("me")
        .await
        .unwrap();

    assert_eq!(list.friends.len(), 1);
    assert_eq!(list.friends[0].friend_since, Some(42));
}

#[tokio::test]
async fn test_fetch_friends_missing_profile_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FRIEND_LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "friendslist": {"friends": [
                {"steamid": "A", "relationship": "friend", "friend_since": 100},
                {"steamid": "B", "relationship": "friend", "friend_since": 200}
            ]}
        })))
        .mount(&mock_server)
        .await;
    mount_summaries(&mock_server, "A,B", vec![player("A", "ay")]).await;

    let err = client_for(&mock_server)
        .users()
        .fetch_friends("me")
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::FetchFriends));
    assert!(matches!(err.root(), Error::FriendProfileMissing { steam_id } if steam_id == "B"));
}

#[tokio::test]
async fn test_fetch_friends_empty_list_skips_bulk_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FRIEND_LIST))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"friendslist": {"friends": []}})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .respond_with(summaries(vec![]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let list = client_for(&mock_server)
        .users()
        .fetch_friends("loner")
        .await
        .unwrap();

    assert!(list.friends.is_empty());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_fetch_friends_propagates_relation_failure() {
    let mock_server = MockServer::start().await;

    // Private friend lists answer 401
    Mock::given(method("GET"))
        .and(path(FRIEND_LIST))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .users()
        .fetch_friends("private")
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::FetchFriends));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    assert!(err.to_string().starts_with("Error getting user friends list: HTTP Error!"));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_resolve_vanity_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VANITY))
        .and(query_param("vanityurl", "the12thchairman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"steamid": "76561198995017863", "success": 1}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(VANITY))
        .and(query_param("vanityurl", "nobody"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"success": 42, "message": "No match"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let users = client.users();

    assert_eq!(
        users.resolve_vanity_name("the12thchairman").await.unwrap(),
        VanityResolution::Resolved {
            steam_id: "76561198995017863".to_string()
        }
    );
    assert_eq!(
        users.resolve_vanity_name("nobody").await.unwrap(),
        VanityResolution::Unresolved {
            message: "No match".to_string()
        }
    );
}

#[tokio::test]
async fn test_search_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VANITY))
        .and(query_param("vanityurl", "chairman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"steamid": "765", "success": 1}
        })))
        .mount(&mock_server)
        .await;
    mount_summaries(&mock_server, "765", vec![player("765", "chairman")]).await;

    Mock::given(method("GET"))
        .and(path(VANITY))
        .and(query_param("vanityurl", "ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"success": 42, "message": "No match"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    match client.users().search_user("chairman").await.unwrap() {
        UserSearch::Found(ProfileLookup::Single { player }) => {
            assert_eq!(player.persona_name, "chairman");
        }
        other => panic!("unexpected search result: {other:?}"),
    }

    assert_eq!(
        client.users().search_user("ghost").await.unwrap(),
        UserSearch::Unresolved {
            message: "No match".to_string()
        }
    );
}

#[tokio::test]
async fn test_fetch_owned_games_flags() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IPlayerService/GetOwnedGames/v1/"))
        .and(query_param("steamid", "765"))
        .and(query_param("include_appinfo", "true"))
        .and(query_param("include_played_free_games", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "game_count": 1,
                "games": [{"appid": 440, "name": "Team Fortress 2", "playtime_forever": 1200}]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let games = client_for(&mock_server)
        .users()
        .fetch_owned_games("765", true, false)
        .await
        .unwrap();

    assert_eq!(games.game_count, 1);
    assert_eq!(games.games[0].name.as_deref(), Some("Team Fortress 2"));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_pass_through_endpoints_unwrap_response() {
    let mock_server = MockServer::start().await;

    let routes = [
        (
            "/IPlayerService/GetRecentlyPlayedGames/v1/",
            json!({"response": {"total_count": 1, "games": [
                {"appid": 570, "name": "Dota 2", "playtime_2weeks": 60, "playtime_forever": 9000}
            ]}}),
        ),
        (
            "/IPlayerService/GetSteamLevel/v1/",
            json!({"response": {"player_level": 27}}),
        ),
        (
            "/IPlayerService/GetBadges/v1/",
            json!({"response": {
                "badges": [{"badgeid": 1, "level": 5, "completion_time": 1600000000, "xp": 250, "scarcity": 1000}],
                "player_xp": 2500,
                "player_level": 27,
                "player_xp_needed_to_level_up": 100,
                "player_xp_needed_current_level": 2400
            }}),
        ),
        (
            "/IGameServersService/GetAccountPublicInfo/v1",
            json!({"response": {"steamid": "765", "appid": 0}}),
        ),
    ];

    for (route, body) in routes {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("steamid", "765"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    let users = client.users();

    let recent = users.fetch_recently_played("765").await.unwrap();
    assert_eq!(recent.total_count, 1);
    assert_eq!(recent.games[0].playtime_2weeks, 60);

    let level = users.fetch_steam_level("765").await.unwrap();
    assert_eq!(level.player_level, Some(27));

    let badges = users.fetch_badges("765").await.unwrap();
    assert_eq!(badges.badges.len(), 1);
    assert_eq!(badges.player_xp, 2500);

    let info = users.fetch_account_public_info("765").await.unwrap();
    assert_eq!(info.steam_id.as_deref(), Some("765"));

    mock_server.verify().await;
}

#[tokio::test]
async fn test_fetch_badge_progress() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IPlayerService/GetCommunityBadgeProgress/v1"))
        .and(query_param("steamid", "765"))
        .and(query_param("badgeid", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"quests": [
                {"questid": 115, "completed": true},
                {"questid": 116, "completed": false}
            ]}
        })))
        .mount(&mock_server)
        .await;

    let progress = client_for(&mock_server)
        .users()
        .fetch_badge_progress("765", 2)
        .await
        .unwrap();

    assert_eq!(progress.quests.len(), 2);
    assert!(progress.quests[0].completed);
}

#[tokio::test]
async fn test_fetch_bans() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ISteamUser/GetPlayerBans/v1"))
        .and(query_param("steamids", "765"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "players": [{
                "SteamId": "765",
                "CommunityBanned": false,
                "VACBanned": false,
                "NumberOfVACBans": 0,
                "DaysSinceLastBan": 0,
                "NumberOfGameBans": 1,
                "EconomyBan": "none"
            }]
        })))
        .mount(&mock_server)
        .await;

    let bans = client_for(&mock_server)
        .users()
        .fetch_bans("765")
        .await
        .unwrap();

    assert_eq!(bans.len(), 1);
    assert_eq!(bans[0].number_of_game_bans, 1);
}

#[tokio::test]
async fn test_schema_mismatch_is_wrapped_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IPlayerService/GetSteamLevel/v1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": {"player_level": "max"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .users()
        .fetch_steam_level("765")
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::FetchSteamLevel));
    assert!(matches!(err.root(), Error::UnexpectedShape { .. }));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_empty_body_where_payload_expected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ISteamUser/GetPlayerBans/v1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .users()
        .fetch_bans("765")
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::FetchBans));
    assert!(matches!(err.root(), Error::UnexpectedEmptyBody));
}
