mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};

const MISSING_ID: &str = "64b7f0c2a1b2c3d4e5f60718";

#[tokio::test]
async fn created_submission_reads_back_with_generated_id() {
    let app = TestApp::spawn().await;
    let body = json!({
        "assignmentId": "64b7f0c2a1b2c3d4e5f60000",
        "userEmail": "learner@example.com",
        "pdfLink": "https://example.com/answer.pdf",
        "status": "pending",
    });

    let id = app.insert("/take-assignment", &body).await;
    let stored = app.get_json(&format!("/take-assignment/{}", id)).await;

    let mut expected = body.clone();
    expected["_id"] = Value::String(id);
    assert_eq!(stored, expected);
}

#[tokio::test]
async fn client_supplied_id_is_ignored_on_create() {
    let app = TestApp::spawn().await;

    let id = app
        .insert(
            "/take-assignment",
            &json!({ "_id": MISSING_ID, "status": "pending" }),
        )
        .await;

    assert_ne!(id, MISSING_ID);
    let stored = app.get_json(&format!("/take-assignment/{}", id)).await;
    assert_eq!(stored["_id"], id);
}

#[tokio::test]
async fn update_merges_given_fields_only() {
    let app = TestApp::spawn().await;
    let id = app
        .insert(
            "/take-assignment",
            &json!({ "userEmail": "learner@example.com", "status": "pending" }),
        )
        .await;

    let response = app
        .client
        .patch(app.url(&format!("/take-assignment/{}", id)))
        .json(&json!({ "status": "completed", "obtainedMarks": 45, "feedback": "Well done" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["matchedCount"], 1);
    assert_eq!(ack["modifiedCount"], 1);

    let stored = app.get_json(&format!("/take-assignment/{}", id)).await;
    assert_eq!(
        stored,
        json!({
            "_id": id,
            "userEmail": "learner@example.com",
            "status": "completed",
            "obtainedMarks": 45,
            "feedback": "Well done",
        })
    );
}

#[tokio::test]
async fn update_of_missing_submission_creates_nothing() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .patch(app.url(&format!("/take-assignment/{}", MISSING_ID)))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["matchedCount"], 0);
    assert_eq!(ack["modifiedCount"], 0);
    assert_eq!(ack["upsertedCount"], 0);
    assert!(ack["upsertedId"].is_null());

    let stored = app
        .get_json(&format!("/take-assignment/{}", MISSING_ID))
        .await;
    assert!(stored.is_null());
    assert_eq!(app.get_json("/take-assignment").await, json!([]));
}

#[tokio::test]
async fn empty_update_matches_without_modifying() {
    let app = TestApp::spawn().await;
    let id = app
        .insert("/take-assignment", &json!({ "status": "pending" }))
        .await;

    let response = app
        .client
        .patch(app.url(&format!("/take-assignment/{}", id)))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["matchedCount"], 1);
    assert_eq!(ack["modifiedCount"], 0);

    let stored = app.get_json(&format!("/take-assignment/{}", id)).await;
    assert_eq!(stored, json!({ "_id": id, "status": "pending" }));
}

#[tokio::test]
async fn list_filters_by_submitter_email() {
    let app = TestApp::spawn().await;
    for (n, email) in [
        "a@example.com",
        "b@example.com",
        "a@example.com",
        "c@example.com",
    ]
    .iter()
    .enumerate()
    {
        app.insert("/take-assignment", &json!({ "n": n, "userEmail": email }))
            .await;
    }

    let filtered = app
        .get_json("/take-assignment?userEmail=a@example.com")
        .await;
    let ns: Vec<i64> = filtered
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| {
            assert_eq!(doc["userEmail"], "a@example.com");
            doc["n"].as_i64().unwrap()
        })
        .collect();
    assert_eq!(ns, vec![0, 2]);

    let none = app
        .get_json("/take-assignment?userEmail=nobody@example.com")
        .await;
    assert_eq!(none, json!([]));

    let all = app.get_json("/take-assignment").await;
    assert_eq!(all.as_array().unwrap().len(), 4);

    let empty_filter = app.get_json("/take-assignment?userEmail=").await;
    assert_eq!(empty_filter.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn malformed_submission_id_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .patch(app.url("/take-assignment/12345"))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
