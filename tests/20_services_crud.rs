mod common;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_get_update_delete_round_trip() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;
    let started = Utc::now();

    let res = server
        .post("/services")
        .json(&json!({
            "name": "New Test Service",
            "description": "New Description",
            "versions": ["1.0"]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty(), "missing id: {}", created);
    assert_eq!(created["name"], "New Test Service");
    let created_at: DateTime<Utc> = serde_json::from_value(created["created_at"].clone())?;
    assert!(created_at >= started, "created_at {} before request start {}", created_at, started);

    let res = server.get(&format!("/services/{}", id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let res = server
        .put(&format!("/services/{}", id))
        .json(&json!({ "name": "Updated" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Service updated successfully" }));

    let fetched = server.get(&format!("/services/{}", id)).send().await?.json::<Value>().await?;
    assert_eq!(fetched["name"], "Updated");
    assert_eq!(fetched["description"], "");
    assert_eq!(fetched["versions"], json!([]));
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["created_at"], created["created_at"]);

    let res = server.delete(&format!("/services/{}", id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Service deleted successfully" }));

    let res = server.get(&format!("/services/{}", id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Service not found");
    Ok(())
}

#[tokio::test]
async fn create_ignores_client_supplied_system_fields() -> Result<()> {
    let server = common::spawn_server(vec![common::service("taken", "Existing", "")]).await?;

    let mut ids = Vec::new();
    for _ in 0..2 {
        let res = server
            .post("/services")
            .json(&json!({
                "id": "taken",
                "created_at": "1999-01-01T00:00:00Z",
                "name": "Spoofed"
            }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = res.json::<Value>().await?;
        assert_ne!(body["id"], "taken");
        assert_ne!(body["created_at"], "1999-01-01T00:00:00Z");
        assert_eq!(body["description"], "");
        assert_eq!(body["versions"], json!([]));
        ids.push(body["id"].as_str().unwrap_or_default().to_string());
    }
    assert_ne!(ids[0], ids[1]);

    let existing = server.get("/services/taken").send().await?.json::<Value>().await?;
    assert_eq!(existing["name"], "Existing");
    Ok(())
}

#[tokio::test]
async fn create_rejects_bad_bodies() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;

    let res = server
        .post("/services")
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");

    let res = server.post("/services").json(&json!({ "description": "no name" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server.post("/services").json(&json!({ "name": "   " })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "BAD_REQUEST");

    let res = server.post("/services").json(&json!({ "name": "x", "versions": "1.0" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let list = server.get("/services").send().await?.json::<Value>().await?;
    assert_eq!(list["total"], 0);
    Ok(())
}

#[tokio::test]
async fn update_replaces_exactly_the_mutable_fields() -> Result<()> {
    let seeded = common::service("1", "Test Service 1", "Description 1");
    let server = common::spawn_server(vec![seeded.clone()]).await?;
    let before = server.get("/services/1").send().await?.json::<Value>().await?;

    let res = server
        .put("/services/1")
        .json(&json!({
            "id": "hijacked",
            "created_at": "1999-01-01T00:00:00Z",
            "name": "Updated Test Service 1",
            "description": "Updated Description 1",
            "versions": ["1.1", "2.0"]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let after = server.get("/services/1").send().await?.json::<Value>().await?;
    assert_eq!(after["id"], "1");
    assert_eq!(after["created_at"], before["created_at"]);
    assert_eq!(after["name"], "Updated Test Service 1");
    assert_eq!(after["description"], "Updated Description 1");
    assert_eq!(after["versions"], json!(["1.1", "2.0"]));

    let res = server.get("/services/hijacked").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_accepts_body_without_name() -> Result<()> {
    let server = common::spawn_server(vec![common::service("1", "Test Service 1", "Description 1")]).await?;

    let res = server.put("/services/1").json(&json!({ "description": "only desc" })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Service updated successfully" }));

    let after = server.get("/services/1").send().await?.json::<Value>().await?;
    assert_eq!(after["name"], "");
    assert_eq!(after["description"], "only desc");
    assert_eq!(after["versions"], json!([]));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_id_is_not_found_and_changes_nothing() -> Result<()> {
    let server = common::spawn_server(vec![common::service("1", "Test Service 1", "")]).await?;
    let before = server.get("/services").send().await?.json::<Value>().await?;

    let res = server.put("/services/nope").json(&json!({ "name": "Ghost" })).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "Service not found");

    let after = server.get("/services").send().await?.json::<Value>().await?;
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn update_rejects_bad_bodies_before_lookup() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;
    let res = server
        .put("/services/nope")
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");

    let res = server.put("/services/nope").json(&json!({ "versions": "1.0" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_of_missing_id_is_not_found() -> Result<()> {
    let server = common::spawn_server(vec![common::service("1", "Test Service 1", "")]).await?;

    let res = server.delete("/services/2").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.delete("/services/1").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let res = server.delete("/services/1").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
