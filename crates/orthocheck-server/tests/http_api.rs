//! Integration tests for the HTTP API.
//!
//! Each test starts its own server on an ephemeral port, backed by the
//! in-memory store and a wiremock dictionary, so tests are fully isolated
//! and need no external services.
//!
//! Run with: cargo test -p orthocheck-server --test http_api

use orthocheck_server::{AppConfig, AppState, build_app};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Dictionary stub that recognizes the given words with a 200 response.
/// Unmatched paths get wiremock's default 404, which the client reads as
/// "not in the dictionary".
async fn start_dictionary(known_words: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    for word in known_words {
        Mock::given(method("GET"))
            .and(path(format!("/{word}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "word": word }])))
            .mount(&server)
            .await;
    }
    server
}

/// Create an AppConfig pointing at the given dictionary URL
fn create_config(dictionary_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.dictionary.base_url = dictionary_url.to_string();
    config
}

async fn start_server(
    config: &AppConfig,
) -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    orthocheck_server::metrics::init_metrics();
    let state = AppState::from_config(config).expect("build state");
    let app = build_app(state, config);

    // Bind to an ephemeral port
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

#[tokio::test]
async fn banner_health_and_metrics_endpoints() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client.get(&base).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let banner: Value = resp.json().await.unwrap();
    assert_eq!(banner["service"], "Orthocheck Server");
    assert_eq!(banner["status"], "ok");
    assert!(banner["version"].as_str().is_some_and(|v| !v.is_empty()));

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let health: Value = resp.json().await.unwrap();
    assert_eq!(health["status"], "ok");

    // start_server installs the recorder, so the exposition endpoint serves
    let resp = client.get(format!("{base}/metrics")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn check_text_classifies_words_in_order() {
    let dictionary = start_dictionary(&["hello", "world"]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    // Duplicate occurrences stay in the output, one entry per occurrence
    let resp = client
        .get(format!("{base}/check"))
        .query(&[("text", "hello wrld hello")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0]["word"], "hello");
    assert_eq!(errors[0]["status"], "Correct");
    assert!(errors[0].get("error").is_none());
    assert_eq!(errors[1]["word"], "wrld");
    assert_eq!(errors[1]["status"], "Error");
    assert_eq!(errors[1]["error"], "word not found in dictionary");
    assert_eq!(errors[2]["word"], "hello");
    assert_eq!(errors[2]["status"], "Correct");

    // One persisted row per distinct word, each tagged with the default category
    let resp = client
        .get(format!("{base}/spell-checks"))
        .send()
        .await
        .unwrap();
    let records: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record["id"].as_i64().is_some());
        let categories = record["categories"].as_array().expect("categories");
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0]["name"], "Orthography");
    }

    // The default category was created on first use
    let resp = client
        .get(format!("{base}/categories"))
        .send()
        .await
        .unwrap();
    let categories: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Orthography");
    assert!(categories[0]["id"].as_i64().is_some());

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn check_text_rejects_blank_input() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/check"))
        .query(&[("text", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "invalid-argument");

    let resp = client
        .get(format!("{base}/check"))
        .query(&[("text", "   ")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    // Missing query parameter is rejected before the handler runs
    let resp = client.get(format!("{base}/check")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn check_text_memoizes_dictionary_lookups() {
    let dictionary = MockServer::start().await;
    // Two occurrences in one text plus a repeated request must still
    // produce exactly one upstream lookup; verified when the mock drops.
    Mock::given(method("GET"))
        .and(path("/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "word": "hello" }])))
        .expect(1)
        .mount(&dictionary)
        .await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/check"))
        .query(&[("text", "hello hello")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let first: Value = resp.json().await.unwrap();
    assert_eq!(first["errors"].as_array().unwrap().len(), 2);

    let resp = client
        .get(format!("{base}/check"))
        .query(&[("text", "hello hello")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let second: Value = resp.json().await.unwrap();
    assert_eq!(second, first);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn misspelled_word_is_upserted_not_duplicated() {
    let dictionary = start_dictionary(&["again"]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/check"))
        .query(&[("text", "helllo")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0]["status"], "Error");

    let resp = client
        .get(format!("{base}/spell-checks"))
        .send()
        .await
        .unwrap();
    let records: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "helllo");
    assert_eq!(records[0]["status"], "Error");
    assert_eq!(records[0]["error"], "word not found in dictionary");

    // Re-checking the same word in a different text reuses the existing row
    let resp = client
        .get(format!("{base}/check"))
        .query(&[("text", "helllo again")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let resp = client
        .get(format!("{base}/spell-checks"))
        .send()
        .await
        .unwrap();
    let records: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(records.len(), 2);
    let helllo_rows: Vec<&Value> = records.iter().filter(|r| r["name"] == "helllo").collect();
    assert_eq!(helllo_rows.len(), 1);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn bulk_check_reports_verdicts_and_persists_summary() {
    let dictionary = start_dictionary(&["hello", "world"]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/check/bulk"))
        .json(&json!({"texts": ["hello world", "hello wrld"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let verdicts: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(verdicts.len(), 2);
    assert_eq!(verdicts[0]["text"], "hello world");
    assert_eq!(verdicts[0]["correct"], true);
    assert_eq!(verdicts[0]["results"].as_array().unwrap().len(), 2);
    assert_eq!(verdicts[1]["text"], "hello wrld");
    assert_eq!(verdicts[1]["correct"], false);
    assert_eq!(verdicts[1]["results"][1]["status"], "Error");

    // The run leaves one summary row naming the failed texts
    let resp = client
        .get(format!("{base}/spell-checks"))
        .send()
        .await
        .unwrap();
    let records: Vec<Value> = resp.json().await.unwrap();
    let summaries: Vec<&Value> = records
        .iter()
        .filter(|r| {
            r["name"]
                .as_str()
                .is_some_and(|n| n.starts_with("SpellCheck_"))
        })
        .collect();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["status"], "Error");
    assert_eq!(summaries[0]["error"], "hello wrld");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn bulk_check_handles_blank_texts_and_empty_batches() {
    let dictionary = start_dictionary(&["hello"]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    // An empty batch returns empty and persists nothing
    let resp = client
        .post(format!("{base}/check/bulk"))
        .json(&json!({"texts": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let verdicts: Vec<Value> = resp.json().await.unwrap();
    assert!(verdicts.is_empty());

    let resp = client
        .get(format!("{base}/spell-checks"))
        .send()
        .await
        .unwrap();
    let records: Vec<Value> = resp.json().await.unwrap();
    assert!(records.is_empty());

    // A blank text yields a failed verdict instead of aborting the batch
    let resp = client
        .post(format!("{base}/check/bulk"))
        .json(&json!({"texts": ["   ", "hello"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let verdicts: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(verdicts[0]["correct"], false);
    assert!(verdicts[0]["results"].as_array().unwrap().is_empty());
    assert_eq!(verdicts[1]["correct"], true);

    // An all-correct run still writes its summary
    let resp = client
        .post(format!("{base}/check/bulk"))
        .json(&json!({"texts": ["hello"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let resp = client
        .get(format!("{base}/spell-checks"))
        .send()
        .await
        .unwrap();
    let records: Vec<Value> = resp.json().await.unwrap();
    let correct_summaries: Vec<&Value> = records
        .iter()
        .filter(|r| {
            r["name"]
                .as_str()
                .is_some_and(|n| n.starts_with("SpellCheck_"))
                && r["status"] == "Correct"
        })
        .collect();
    assert_eq!(correct_summaries.len(), 1);
    assert!(correct_summaries[0].get("error").is_none());

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn category_crud_flow() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    // Create
    let resp = client
        .post(format!("{base}/categories"))
        .json(&json!({"name": "Grammar"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().expect("created id");
    assert_eq!(created["name"], "Grammar");

    // Read
    let resp = client
        .get(format!("{base}/categories/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let read_back: Value = resp.json().await.unwrap();
    assert_eq!(read_back["id"], id);
    assert_eq!(read_back["name"], "Grammar");

    // Update
    let resp = client
        .put(format!("{base}/categories/{id}"))
        .json(&json!({"name": "Style"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["name"], "Style");

    let resp = client
        .get(format!("{base}/categories"))
        .send()
        .await
        .unwrap();
    let all: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["name"], "Style");

    // Delete
    let resp = client
        .delete(format!("{base}/categories/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base}/categories/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "not-found");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn category_error_cases() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    // Non-positive ids are rejected before touching the store
    let resp = client
        .get(format!("{base}/categories/0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "invalid-argument");

    let resp = client
        .get(format!("{base}/categories/-5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    // Updating or deleting a missing category answers 404
    let resp = client
        .put(format!("{base}/categories/9999"))
        .json(&json!({"name": "Ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{base}/categories/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn category_status_update_and_clear() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/categories"))
        .json(&json!({"name": "Grammar"}))
        .send()
        .await
        .unwrap();
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert!(created.get("status").is_none());

    // Set status
    let resp = client
        .put(format!("{base}/categories/{id}/status"))
        .json(&json!({"status": "Active"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["status"], "Active");

    // The status survives a read through the cache
    let resp = client
        .get(format!("{base}/categories/{id}"))
        .send()
        .await
        .unwrap();
    let read_back: Value = resp.json().await.unwrap();
    assert_eq!(read_back["status"], "Active");

    // Clear status
    let resp = client
        .delete(format!("{base}/categories/{id}/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let cleared: Value = resp.json().await.unwrap();
    assert!(cleared.get("status").is_none());

    let resp = client
        .put(format!("{base}/categories/9999/status"))
        .json(&json!({"status": "Active"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn spell_check_crud_flow() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    // Create
    let resp = client
        .post(format!("{base}/spell-checks"))
        .json(&json!({
            "name": "recieve",
            "status": "Error",
            "error": "word not found in dictionary",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().expect("created id");

    // Read
    let resp = client
        .get(format!("{base}/spell-checks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let read_back: Value = resp.json().await.unwrap();
    assert_eq!(read_back["name"], "recieve");
    assert_eq!(read_back["status"], "Error");

    // Update rewrites name, status and error; omitting error clears it
    let resp = client
        .put(format!("{base}/spell-checks/{id}"))
        .json(&json!({"name": "receive", "status": "Correct"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["name"], "receive");
    assert_eq!(updated["status"], "Correct");
    assert!(updated.get("error").is_none());

    // Delete
    let resp = client
        .delete(format!("{base}/spell-checks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base}/spell-checks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{base}/spell-checks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{base}/spell-checks/0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn attach_and_detach_categories() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/spell-checks"))
        .json(&json!({"name": "helllo", "status": "Error"}))
        .send()
        .await
        .unwrap();
    let record: Value = resp.json().await.unwrap();
    let record_id = record["id"].as_i64().unwrap();

    let resp = client
        .post(format!("{base}/categories"))
        .json(&json!({"name": "Grammar"}))
        .send()
        .await
        .unwrap();
    let category: Value = resp.json().await.unwrap();
    let category_id = category["id"].as_i64().unwrap();

    // Attach
    let resp = client
        .post(format!(
            "{base}/spell-checks/{record_id}/categories/{category_id}"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let attached: Value = resp.json().await.unwrap();
    assert_eq!(attached["categories"].as_array().unwrap().len(), 1);
    assert_eq!(attached["categories"][0]["id"], category_id);

    // Attaching twice leaves a single membership
    let resp = client
        .post(format!(
            "{base}/spell-checks/{record_id}/categories/{category_id}"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let attached: Value = resp.json().await.unwrap();
    assert_eq!(attached["categories"].as_array().unwrap().len(), 1);

    // The membership is visible from the category side
    let resp = client
        .get(format!("{base}/categories/{category_id}/spell-checks"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let members: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["id"], record_id);

    // Detach; repeating it is a no-op
    let resp = client
        .delete(format!(
            "{base}/spell-checks/{record_id}/categories/{category_id}"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let detached: Value = resp.json().await.unwrap();
    assert!(detached.get("categories").is_none());

    let resp = client
        .delete(format!(
            "{base}/spell-checks/{record_id}/categories/{category_id}"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let resp = client
        .get(format!("{base}/categories/{category_id}/spell-checks"))
        .send()
        .await
        .unwrap();
    let members: Vec<Value> = resp.json().await.unwrap();
    assert!(members.is_empty());

    // Either side missing answers 404
    let resp = client
        .post(format!("{base}/spell-checks/{record_id}/categories/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let resp = client
        .post(format!("{base}/spell-checks/9999/categories/{category_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn category_spell_checks_requires_known_category() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/categories/9999/spell-checks"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "not-found");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn counter_tracks_completed_requests() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let resp = client
        .get(format!("{base}/categories/12345"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    // The snapshot is taken before the counter request itself is recorded
    let resp = client.get(format!("{base}/counter")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let counter: Value = resp.json().await.unwrap();
    assert_eq!(counter["total"], 2);
    assert_eq!(counter["succeeded"], 1);
    assert_eq!(counter["failed"], 1);

    // The previous counter read now shows up in the tally
    let resp = client.get(format!("{base}/counter")).send().await.unwrap();
    let counter: Value = resp.json().await.unwrap();
    assert_eq!(counter["total"], 3);
    assert_eq!(counter["succeeded"], 2);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn request_id_is_assigned_and_echoed() {
    let dictionary = start_dictionary(&[]).await;
    let config = create_config(&dictionary.uri());
    let (base, shutdown_tx, handle) = start_server(&config).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    let generated = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(!generated.is_empty());

    // A caller-provided id is preserved
    let resp = client
        .get(format!("{base}/health"))
        .header("x-request-id", "test-req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "test-req-42");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
