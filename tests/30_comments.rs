mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn comments_for_an_article_newest_first() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };

    let (status, body) = server.get("/api/articles/9/comments").await?;
    assert_eq!(status, StatusCode::OK);
    let comments = body["comments"].as_array().expect("comments array");
    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|c| c["article_id"] == 9));
    let dates: Vec<&str> = comments.iter().filter_map(|c| c["created_at"].as_str()).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]), "{dates:?}");
    Ok(())
}

#[tokio::test]
async fn article_without_comments_is_an_empty_list() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let (status, body) = server.get("/api/articles/2/comments").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "comments": [] }));
    Ok(())
}

#[tokio::test]
async fn posted_comment_is_listed() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };

    let (status, body) = server
        .post(
            "/api/articles/5/comments",
            &json!({ "username": "rogersop", "body": "posted from the integration suite" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let comment = &body["comment"];
    assert_eq!(comment["author"], "rogersop");
    assert_eq!(comment["article_id"], 5);
    assert_eq!(comment["votes"], 0);

    let (_, listed) = server.get("/api/articles/5/comments").await?;
    let listed = listed["comments"].as_array().expect("comments array");
    assert!(listed.iter().any(|c| c["comment_id"] == comment["comment_id"]
        && c["body"] == "posted from the integration suite"
        && c["author"] == "rogersop"));
    Ok(())
}

#[tokio::test]
async fn unknown_username_is_rejected_without_insert() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };

    let (_, before) = server.get("/api/articles/6/comments").await?;
    let (status, body) = server
        .post("/api/articles/6/comments", &json!({ "username": "nobody", "body": "hello" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "400: bad request - referenced value does not exist");

    let (_, after) = server.get("/api/articles/6/comments").await?;
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn comment_endpoints_validate_the_article_id() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };

    let (status, _) = server.get("/api/articles/abc/comments").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .post("/api/articles/9999/comments", &json!({ "username": "lurker", "body": "hi" }))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server
        .post("/api/articles/1/comments", &json!({ "username": "lurker" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "400: bad request - missing required field");
    Ok(())
}
