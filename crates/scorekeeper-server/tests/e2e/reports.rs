//! Report tests.

use super::common::*;
use axum::http::StatusCode;
use chrono::{Days, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

async fn seed(ctx: &TestContext) {
    ctx.reset().await;
    for (name, date) in [
        ("Ada", "2024-01-01"),
        ("Grace", "2024-02-01"),
        ("Linus", "2024-03-01"),
        ("Ken", "2024-03-02"),
    ] {
        ctx.create_player(name, date).await;
    }
    ctx.create_game("Tetris", "Puzzle").await;
    ctx.create_game("Doom", "Shooter").await;
    ctx.create_game("Quake", "Shooter").await;

    ctx.record_score(1, 1, 10).await;
    ctx.record_score(1, 2, 15).await;
    ctx.record_score(2, 3, 100).await;
    ctx.record_score(4, 2, 50).await;
}

pub async fn test_player_scores(ctx: &TestContext) {
    println!("  🧪 test_player_scores");
    seed(ctx).await;

    let (status, body) = ctx.send("GET", "/players-scores", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(body[2], json!({ "name": "Grace", "title": "Quake", "score": 100 }));

    let (status, body) = ctx.send("GET", "/players-scores?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "name": "Ada", "title": "Tetris", "score": 10 }]));

    let (status, _) = ctx.send("GET", "/players-scores?limit=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    println!("     ✓ Joined rows returned in score order and limited");
}

pub async fn test_top_players(ctx: &TestContext) {
    println!("  🧪 test_top_players");
    seed(ctx).await;

    let (status, body) = ctx.send("GET", "/top-players", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "name": "Grace", "total_score": 100 },
            { "name": "Ken", "total_score": 50 },
            { "name": "Ada", "total_score": 25 }
        ])
    );

    println!("     ✓ Three highest totals, highest first");
}

pub async fn test_inactive_players(ctx: &TestContext) {
    println!("  🧪 test_inactive_players");
    seed(ctx).await;

    let (status, body) = ctx.send("GET", "/inactive-players", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "name": "Linus" }]));

    println!("     ✓ Only players without scores");
}

pub async fn test_popular_genres(ctx: &TestContext) {
    println!("  🧪 test_popular_genres");
    ctx.reset().await;

    let (status, _) = ctx.send("GET", "/popular-genres", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    seed(ctx).await;
    let (status, body) = ctx.send("GET", "/popular-genres", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "genre": "Shooter", "times_played": 3 }));

    println!("     ✓ Most played genre, 404 when nothing was played");
}

pub async fn test_recent_players(ctx: &TestContext) {
    println!("  🧪 test_recent_players");
    ctx.reset().await;

    let today = Utc::now().date_naive();
    ctx.create_player("Old", "2020-05-05").await;
    ctx.create_player("New", &(today - Days::new(2)).to_string()).await;
    ctx.create_player("Newer", &(today - Days::new(1)).to_string()).await;

    let (status, body) = ctx.send("GET", "/recent-players", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Newer", "New"]);

    println!("     ✓ Players from the last 30 days, newest first");
}

pub async fn run_all_tests(ctx: &TestContext) {
    println!("\n📊 Report Tests");
    test_player_scores(ctx).await;
    test_top_players(ctx).await;
    test_inactive_players(ctx).await;
    test_popular_genres(ctx).await;
    test_recent_players(ctx).await;
}
