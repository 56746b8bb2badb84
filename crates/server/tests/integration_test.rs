use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::time::Duration;

use ventokv_storage::{Store, queue};

/// Helper: sobe o servidor numa porta livre e retorna a URL base.
async fn start_server() -> String {
    let listener = ventokv_server::bind("127.0.0.1", 0).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        ventokv_server::run(listener, Store::new(), std::future::pending())
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

/// Helper: executa um comando via `POST /command`.
async fn send_command(client: &Client, base: &str, line: &str) -> (StatusCode, Value) {
    let response = client
        .post(format!("{base}/command"))
        .json(&json!({ "command": line }))
        .send()
        .await
        .unwrap();
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get_value(client: &Client, base: &str, key: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{base}/get"))
        .query(&[("key", key)])
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json::<Value>().await.unwrap())
}

#[tokio::test]
async fn test_set_get() {
    let base = start_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/set"))
        .json(&json!({ "key": "mykey", "value": "myvalue" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (status, body) = get_value(&client, &base, "mykey").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "value": "myvalue" }));
}

#[tokio::test]
async fn test_get_nonexistent() {
    let base = start_server().await;
    let client = Client::new();

    let (status, body) = get_value(&client, &base, "missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_without_key() {
    let base = start_server().await;
    let client = Client::new();

    let response = client.get(format!("{base}/get")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_conditions() {
    let base = start_server().await;
    let client = Client::new();

    let set = |body: Value| {
        let client = client.clone();
        let url = format!("{base}/set");
        async move { client.post(url).json(&body).send().await.unwrap().status() }
    };

    // XX em chave ausente: 404
    let status = set(json!({ "key": "k", "value": "v0", "condition": "XX" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let status = set(json!({ "key": "k", "value": "v1", "condition": "NX" })).await;
    assert_eq!(status, StatusCode::CREATED);

    // NX em chave existente: 409, valor intacto
    let status = set(json!({ "key": "k", "value": "v2", "condition": "NX" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (_, body) = get_value(&client, &base, "k").await;
    assert_eq!(body["value"], "v1");

    let status = set(json!({ "key": "k", "value": "v3", "condition": "XX" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, body) = get_value(&client, &base, "k").await;
    assert_eq!(body["value"], "v3");
}

#[tokio::test]
async fn test_set_invalid_input() {
    let base = start_server().await;
    let client = Client::new();
    let url = format!("{base}/set");

    let cases = [
        json!({ "key": "", "value": "v" }),
        json!({ "key": "k" }),
        json!({ "key": "k", "value": "v", "expiry": -1 }),
        json!({ "key": "k", "value": "v", "expiry": "ten" }),
        json!({ "key": "k", "value": "v", "condition": "MAYBE" }),
    ];
    for body in cases {
        let status = client.post(&url).json(&body).send().await.unwrap().status();
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    }

    let status = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_with_expiry() {
    let base = start_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/set"))
        .json(&json!({ "key": "temp", "value": "val", "expiry": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (status, _) = get_value(&client, &base, "temp").await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (status, _) = get_value(&client, &base, "temp").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let health: Value = client
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({ "status": "ok", "keys": 0 }));
}

#[tokio::test]
async fn test_set_with_huge_expiry() {
    let base = start_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/set"))
        .json(&json!({ "key": "far", "value": "v", "expiry": i64::MAX }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (status, body) =
        send_command(&client, &base, &format!("SET far2 v2 EX {}", i64::MAX)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "status": "OK" }));

    let (status, body) = get_value(&client, &base, "far").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "v");

    let (_, body) = get_value(&client, &base, "far2").await;
    assert_eq!(body["value"], "v2");
}

#[tokio::test]
async fn test_qpush() {
    let base = start_server().await;
    let client = Client::new();
    let url = format!("{base}/qpush");

    let response = client
        .post(&url)
        .json(&json!({ "key": "q", "values": ["a"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({ "length": 1 }));

    let response = client
        .post(&url)
        .json(&json!({ "key": "q", "values": ["b", "c"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.json::<Value>().await.unwrap(), json!({ "length": 3 }));

    let (_, body) = get_value(&client, &base, "q").await;
    let items = queue::decode(body["value"].as_str().unwrap()).unwrap();
    assert_eq!(items, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_qpush_invalid_and_wrong_type() {
    let base = start_server().await;
    let client = Client::new();
    let url = format!("{base}/qpush");

    let status = client
        .post(&url)
        .json(&json!({ "key": "q", "values": [] }))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    client
        .post(format!("{base}/set"))
        .json(&json!({ "key": "scalar", "value": "plain" }))
        .send()
        .await
        .unwrap();

    let status = client
        .post(&url)
        .json(&json!({ "key": "scalar", "values": ["x"] }))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, body) = get_value(&client, &base, "scalar").await;
    assert_eq!(body["value"], "plain");
}

#[tokio::test]
async fn test_command_endpoint() {
    let base = start_server().await;
    let client = Client::new();

    let (status, body) = send_command(&client, &base, r#"SET greeting "hello world" EX 60"#).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "status": "OK" }));

    let (status, body) = send_command(&client, &base, "GET greeting").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "value": "hello world" }));

    let (status, _) = send_command(&client, &base, "SET greeting other NX").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send_command(&client, &base, "SET ghost v XX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_command(&client, &base, "QPUSH jobs a b").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "length": 2 }));

    let (status, _) = send_command(&client, &base, "QPUSH greeting x").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_command_parse_errors() {
    let base = start_server().await;
    let client = Client::new();

    for line in ["", "FOOBAR k", "GET", "SET k", "SET k v EX -3", "SET k v EX", "QPUSH q", "SET k \"v"] {
        let (status, body) = send_command(&client, &base, line).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "line: {line:?}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_wrong_method() {
    let base = start_server().await;
    let client = Client::new();

    let response = client.get(format!("{base}/set")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_concurrent_sets_same_key() {
    let base = start_server().await;
    let client = Client::new();

    let mut handles = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        let url = format!("{base}/set");
        handles.push(tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({ "key": "race", "value": format!("v{i}") }))
                .send()
                .await
                .unwrap()
                .status()
        }));
    }
    for h in handles {
        assert_eq!(h.await.unwrap(), StatusCode::CREATED);
    }

    let (_, body) = get_value(&client, &base, "race").await;
    let value = body["value"].as_str().unwrap();
    let written: Vec<String> = (0..16).map(|i| format!("v{i}")).collect();
    assert!(written.iter().any(|w| w == value));
}
