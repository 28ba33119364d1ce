//! Integration tests for the Session & Progress bounded context.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use questlog_narrative::domain::reducer::FALLBACK_NARRATION;
use questlog_store::SqliteRecordStore;
use questlog_test_support::{FailingGateway, ScriptedGateway, SequenceRng};
use uuid::Uuid;

const GOBLIN_REPLY: &str = "The goblin's blade grazes your arm! *damage taken: 5 HP* \
     You strike back and it flees. *gained: 10 XP* What now? 1) Chase it 2) Rest";

#[tokio::test]
async fn test_start_session_defaults() {
    let app = common::build_test_app("unused");
    let character_id = common::create_character(&app, "Brakka", "Warrior").await;

    let (status, json) = common::post_json(
        app,
        "/api/v1/sessions/start",
        &serde_json::json!({ "character_id": character_id }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["character_id"], character_id.as_str());
    assert_eq!(json["ai_provider"], "gemini");
    assert_eq!(json["turn_count"], 0);
    assert_eq!(json["is_active"], true);
    assert_eq!(json["world_state"]["location"], "The Rusty Dragon Tavern");
    assert_eq!(json["world_state"]["time_of_day"], "evening");
}

#[tokio::test]
async fn test_start_session_validates_input() {
    let app = common::build_test_app("unused");
    let character_id = common::create_character(&app, "Brakka", "Warrior").await;

    let (status, json) = common::post_json(
        app.clone(),
        "/api/v1/sessions/start",
        &serde_json::json!({ "character_id": Uuid::new_v4() }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");

    let (status, _) = common::post_json(
        app,
        "/api/v1/sessions/start",
        &serde_json::json!({ "character_id": character_id, "ai_provider": "openai" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_sessions_by_character() {
    let app = common::build_test_app("unused");
    let brakka = common::create_character(&app, "Brakka", "Warrior").await;
    let elowen = common::create_character(&app, "Elowen", "Mage").await;
    common::start_session(&app, &brakka).await;
    common::start_session(&app, &brakka).await;
    common::start_session(&app, &elowen).await;

    let (status, json) =
        common::get_json(app.clone(), &format!("/api/v1/sessions?character_id={brakka}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (_, all) = common::get_json(app, "/api/v1/sessions").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_submit_action_plays_and_records_turn() {
    // Arrange
    let app = common::build_test_app(GOBLIN_REPLY);
    let character_id = common::create_character(&app, "Brakka", "Warrior").await;
    let session_id = common::start_session(&app, &character_id).await;

    // Act
    let (status, json) = common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/actions"),
        &serde_json::json!({ "player_action": "I attack the goblin", "personality": "dark_fantasy" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["dm_response"], GOBLIN_REPLY);
    assert_eq!(json["game_state"]["turn"], 1);
    assert_eq!(json["game_state"]["characterHP"], 25);
    assert_eq!(json["game_state"]["characterXP"], 10);
    assert_eq!(json["leveled_up"], false);

    let (_, messages) =
        common::get_json(app.clone(), &format!("/api/v1/sessions/{session_id}/messages")).await;
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message_type"], "player_action");
    assert_eq!(messages[0]["content"], "I attack the goblin");
    assert_eq!(messages[1]["message_type"], "dm_response");
    assert_eq!(messages[0]["turn_number"], messages[1]["turn_number"]);

    let (_, session) =
        common::get_json(app.clone(), &format!("/api/v1/sessions/{session_id}")).await;
    assert_eq!(session["turn_count"], 1);

    let (_, character) =
        common::get_json(app, &format!("/api/v1/characters/{character_id}")).await;
    assert_eq!(character["current_hp"], 25);
    assert_eq!(character["xp"], 10);
}

#[tokio::test]
async fn test_submit_action_with_failing_backend_returns_fallback() {
    let app = common::build_test_app_with(
        Arc::new(questlog_store::MemoryRecordStore::new()),
        Arc::new(FailingGateway),
        SequenceRng::new(vec![]),
    );
    let character_id = common::create_character(&app, "Brakka", "Warrior").await;
    let session_id = common::start_session(&app, &character_id).await;

    let (status, json) = common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/actions"),
        &serde_json::json!({ "player_action": "Hello?" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["dm_response"], FALLBACK_NARRATION);
    assert_eq!(json["game_state"]["turn"], 1);
    assert_eq!(json["game_state"]["characterHP"], 30);

    let (_, messages) =
        common::get_json(app, &format!("/api/v1/sessions/{session_id}/messages")).await;
    assert_eq!(messages.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_ended_session_rejects_actions() {
    let app = common::build_test_app("unused");
    let character_id = common::create_character(&app, "Brakka", "Warrior").await;
    let session_id = common::start_session(&app, &character_id).await;

    let (status, json) =
        common::post_json(app.clone(), &format!("/api/v1/sessions/{session_id}/end"), &serde_json::json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_active"], false);

    let (status, _) =
        common::post_json(app.clone(), &format!("/api/v1/sessions/{session_id}/end"), &serde_json::json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/actions"),
        &serde_json::json!({ "player_action": "Anyone there?" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_blank_action_returns_400() {
    let app = common::build_test_app("unused");
    let character_id = common::create_character(&app, "Brakka", "Warrior").await;
    let session_id = common::start_session(&app, &character_id).await;

    let (status, _) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/actions"),
        &serde_json::json!({ "player_action": "  " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_turns_persist_in_sqlite() {
    // Arrange
    let store = SqliteRecordStore::in_memory().await.unwrap();
    let app = common::build_test_app_with(
        Arc::new(store),
        Arc::new(ScriptedGateway::new(GOBLIN_REPLY)),
        SequenceRng::new(vec![]),
    );
    let character_id = common::create_character(&app, "Elowen", "Mage").await;
    let session_id = common::start_session(&app, &character_id).await;

    // Act
    for action in ["I cast a light", "I search the room"] {
        let (status, _) = common::post_json(
            app.clone(),
            &format!("/api/v1/sessions/{session_id}/actions"),
            &serde_json::json!({ "player_action": action }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Assert
    let (_, messages) =
        common::get_json(app.clone(), &format!("/api/v1/sessions/{session_id}/messages")).await;
    let turns: Vec<u64> = messages
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["turn_number"].as_u64().unwrap())
        .collect();
    assert_eq!(turns, vec![1, 1, 2, 2]);

    let (_, character) =
        common::get_json(app, &format!("/api/v1/characters/{character_id}")).await;
    assert_eq!(character["current_hp"], 5);
    assert_eq!(character["xp"], 20);
}
