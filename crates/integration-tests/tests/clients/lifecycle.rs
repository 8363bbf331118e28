use integration_tests::TestServer;
use serde_json::json;

#[tokio::test]
async fn create_read_update_delete() {
    let server = TestServer::memory().await;
    let client = &server.client;

    let (status, _) = client
        .post("/clients", &json!({ "userSub": "u1", "clientName": "Acme" }))
        .await;
    assert_eq!(status, 201);

    let (status, body) = client.get("/clients/u1").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], json!({ "userSub": "u1", "clientName": "Acme" }));

    let (status, body) = client.put("/clients/u1", &json!({ "clientName": "Acme Corp" })).await;
    assert_eq!(status, 200);
    insta::assert_json_snapshot!(body, @r#"
    {
      "data": {
        "clientName": "Acme Corp",
        "userSub": "u1"
      },
      "success": true
    }
    "#);

    let (status, body) = client.delete("/clients/u1").await;
    assert_eq!(status, 200);
    insta::assert_json_snapshot!(body, @r#"
    {
      "data": {
        "id": "u1"
      },
      "success": true
    }
    "#);

    let (status, body) = client.get("/clients/u1").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "success": false, "message": "Client not found" }));
}

#[tokio::test]
async fn update_keeps_other_attributes() {
    let server = TestServer::memory().await;

    server
        .client
        .post("/clients", &json!({ "userSub": "u1", "clientName": "Acme", "plan": "pro" }))
        .await;

    let (status, body) = server
        .client
        .put("/clients/u1", &json!({ "clientName": "Acme Corp" }))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["plan"], json!("pro"));
}

#[tokio::test]
async fn update_missing_client() {
    let server = TestServer::memory().await;

    let (status, body) = server
        .client
        .put("/clients/nobody", &json!({ "clientName": "Acme" }))
        .await;

    assert_eq!(status, 404);
    assert_eq!(body, json!({ "success": false, "message": "Client not found" }));

    let (status, _) = server.client.get("/clients/nobody").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn update_requires_client_name() {
    let server = TestServer::memory().await;

    server
        .client
        .post("/clients", &json!({ "userSub": "u1", "clientName": "Acme" }))
        .await;

    let (status, body) = server.client.put("/clients/u1", &json!({})).await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], json!("\"clientName\" is required"));

    let (_, body) = server.client.get("/clients/u1").await;
    assert_eq!(body["data"]["clientName"], json!("Acme"));
}

#[tokio::test]
async fn delete_twice() {
    let server = TestServer::memory().await;

    server
        .client
        .post("/clients", &json!({ "userSub": "u1", "clientName": "Acme" }))
        .await;

    let (status, _) = server.client.delete("/clients/u1").await;
    assert_eq!(status, 200);

    let (status, body) = server.client.delete("/clients/u1").await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], json!("Client not found"));
}
