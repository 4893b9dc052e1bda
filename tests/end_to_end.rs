mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

/// Anonymous link, redirect, login, owned link lifecycle.
#[tokio::test]
async fn test_full_link_lifecycle() {
    let (server, store) = common::make_server();

    let u1 = common::register(&server, "u1@example.com").await;
    let u1_id = u1["id"].as_i64().unwrap();

    // Anonymous shorten.
    let response = server
        .post("/urls/shorten")
        .json(&json!({ "originalUrl": "https://example.com/anonymous" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let short_url = response.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string();
    let prefix = format!("{}/", common::BASE_URL);
    assert!(short_url.starts_with(&prefix));
    let anon_code = short_url[prefix.len()..].to_string();
    assert_eq!(anon_code.len(), 6);

    // Redirect counts one click.
    server
        .get(&format!("/urls/{anon_code}"))
        .await
        .assert_status(StatusCode::FOUND);
    let anon = store.link_by_code(&anon_code).unwrap();
    assert_eq!(anon.click_count, 1);
    assert_eq!(anon.owner_id, None);

    // Log in and create an owned link.
    let token = common::login(&server, "u1@example.com").await;
    let owned_code = common::shorten(&server, "https://example.com/owned", Some(&token)).await;

    let links = server
        .get("/urls")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json::<Vec<Value>>();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["code"], owned_code);
    assert_eq!(links[0]["ownerId"], u1_id);
    let owned_id = links[0]["id"].as_i64().unwrap();

    // Update.
    let updated = server
        .put(&format!("/urls/{owned_id}"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "originalUrl": "https://example.com/owned-v2" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(
        updated.json::<Value>()["originalUrl"],
        "https://example.com/owned-v2"
    );

    // Delete.
    server
        .delete(&format!("/urls/{owned_id}"))
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let links = server
        .get("/urls")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json::<Vec<Value>>();
    assert!(links.is_empty());

    // The anonymous link is untouched.
    server
        .get(&format!("/urls/{anon_code}"))
        .await
        .assert_status(StatusCode::FOUND);
    assert_eq!(store.link_by_code(&anon_code).unwrap().click_count, 2);
}
