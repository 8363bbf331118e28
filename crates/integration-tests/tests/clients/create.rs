use integration_tests::TestServer;
use serde_json::json;

#[tokio::test]
async fn create_returns_the_stored_item() {
    let server = TestServer::memory().await;

    let (status, body) = server
        .client
        .post("/clients", &json!({ "userSub": "u1", "clientName": "Acme" }))
        .await;

    assert_eq!(status, 201);
    insta::assert_json_snapshot!(body, @r#"
    {
      "data": {
        "clientName": "Acme",
        "userSub": "u1"
      },
      "success": true
    }
    "#);
}

#[tokio::test]
async fn extra_fields_are_kept() {
    let server = TestServer::memory().await;

    let (status, body) = server
        .client
        .post(
            "/clients",
            &json!({ "userSub": "u1", "clientName": "Acme", "plan": "pro", "seats": 3 }),
        )
        .await;

    assert_eq!(status, 201);
    assert_eq!(body["data"]["plan"], json!("pro"));

    let (status, body) = server.client.get("/clients/u1").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["seats"], json!(3));
}

#[tokio::test]
async fn missing_user_sub() {
    let server = TestServer::memory().await;

    let (status, body) = server.client.post("/clients", &json!({ "clientName": "Acme" })).await;

    assert_eq!(status, 400);
    insta::assert_json_snapshot!(body, @r#"
    {
      "message": "\"userSub\" is required",
      "success": false
    }
    "#);
}

#[tokio::test]
async fn missing_client_name() {
    let server = TestServer::memory().await;

    let (status, body) = server.client.post("/clients", &json!({ "userSub": "u1" })).await;

    assert_eq!(status, 400);
    insta::assert_json_snapshot!(body, @r#"
    {
      "message": "\"clientName\" is required",
      "success": false
    }
    "#);

    let (status, _) = server.client.get("/clients/u1").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn empty_client_name() {
    let server = TestServer::memory().await;

    let (status, body) = server
        .client
        .post("/clients", &json!({ "userSub": "u1", "clientName": "" }))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], json!("\"clientName\" is not allowed to be empty"));
}

#[tokio::test]
async fn body_must_be_an_object() {
    let server = TestServer::memory().await;

    let (status, body) = server.client.post("/clients", &json!(["u1", "Acme"])).await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn create_overwrites_existing_client() {
    let server = TestServer::memory().await;

    server
        .client
        .post("/clients", &json!({ "userSub": "u1", "clientName": "Acme", "plan": "pro" }))
        .await;

    let (status, _) = server
        .client
        .post("/clients", &json!({ "userSub": "u1", "clientName": "Acme 2" }))
        .await;

    assert_eq!(status, 201);

    let (_, body) = server.client.get("/clients/u1").await;

    insta::assert_json_snapshot!(body, @r#"
    {
      "data": {
        "clientName": "Acme 2",
        "userSub": "u1"
      },
      "success": true
    }
    "#);
}
