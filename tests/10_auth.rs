mod common;

use anyhow::Result;
use reqwest::StatusCode;
use service_catalog::auth::{generate_jwt, Claims};

#[tokio::test]
async fn rejects_requests_without_credentials() -> Result<()> {
    let server = common::spawn_server(vec![common::service("1", "Test Service 1", "")]).await?;
    let client = reqwest::Client::new();

    let requests = [
        client.get(server.url("/services")),
        client.get(server.url("/services/1")),
        client.post(server.url("/services")).json(&serde_json::json!({ "name": "x" })),
        client.put(server.url("/services/1")).json(&serde_json::json!({ "name": "x" })),
        client.delete(server.url("/services/1")),
        client.get(server.url("/not-a-route")),
    ];

    for request in requests {
        let res = request.send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED", "body: {}", body);
        assert!(body["error"].is_string(), "body: {}", body);
    }

    // Handler never ran: the entry is still there.
    let res = server.get("/services/1").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn rejects_tokens_signed_with_another_secret() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;
    let forged = generate_jwt(&Claims::new("intruder", 1)?, "some-other-secret")?;

    let res = reqwest::Client::new()
        .get(server.url("/services"))
        .bearer_auth(forged)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn rejects_non_bearer_schemes() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;

    let res = reqwest::Client::new()
        .get(server.url("/services"))
        .header("Authorization", format!("Token {}", server.token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn accepts_valid_tokens() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;
    let res = server.get("/services").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
