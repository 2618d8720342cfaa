use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};

use quiz_core::model::{AnswerEntry, OptionKey, PlayerId, QuestionId};
use services::{HttpQuestionBank, QuestionBank, QuestionServiceError, SubmitRequest};

#[derive(Clone, Default)]
struct Seen {
    bodies: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

async fn grader(State(seen): State<Seen>, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    seen.content_types.lock().unwrap().push(content_type);

    let request: Value = serde_json::from_str(&body).unwrap();
    seen.bodies.lock().unwrap().push(request.clone());

    let reply = match request["action"].as_str() {
        Some("getQuestions") => json!({
            "success": true,
            "data": {
                "questions": [
                    {"id": 1, "question": "Capital of France?", "optionA": "Paris",
                     "optionB": "Rome", "optionC": "Oslo", "optionD": "Bern", "answer": "A"},
                    {"id": "q-2", "question": "1 + 1 = ?", "optionA": 1,
                     "optionB": 2, "optionC": 3, "optionD": 4}
                ]
            }
        }),
        Some("submitAnswers") => json!({
            "success": true,
            "data": {"score": 1, "total": 2, "passed": false, "isFirstPass": false}
        }),
        _ => json!({"success": false, "error": "unknown action"}),
    };
    Json(reply)
}

async fn rejecting() -> Json<Value> {
    Json(json!({"success": false, "error": "sheet not found"}))
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_grader() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/exec", post(grader))
        .route("/reject", post(rejecting))
        .route("/broken", post(broken))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{port}"), seen)
}

fn bank(base: &str, path: &str) -> HttpQuestionBank {
    HttpQuestionBank::new(format!("{base}{path}"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetch_questions_posts_plain_text_json() {
    let (base, seen) = spawn_grader().await;
    let questions = bank(&base, "/exec")
        .fetch_questions("Bank A", 10)
        .await
        .unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].id(), &QuestionId::number(1));
    assert_eq!(questions[0].prompt(), "Capital of France?");
    assert_eq!(questions[1].id(), &QuestionId::text("q-2"));
    assert_eq!(questions[1].option(OptionKey::B), "2");

    assert_eq!(
        seen.bodies.lock().unwrap()[0],
        json!({"action": "getQuestions", "sheetName": "Bank A", "count": 10})
    );
    assert!(seen.content_types.lock().unwrap()[0].starts_with("text/plain"));
}

#[tokio::test]
async fn submit_answers_echoes_timing() {
    let (base, seen) = spawn_grader().await;
    let request = SubmitRequest {
        player_id: PlayerId::parse("alice").unwrap(),
        answers: vec![
            AnswerEntry {
                question_id: QuestionId::number(1),
                chosen: Some(OptionKey::A),
            },
            AnswerEntry {
                question_id: QuestionId::text("q-2"),
                chosen: Some(OptionKey::D),
            },
        ],
        elapsed_secs: 35,
        was_overtime: true,
    };

    let result = bank(&base, "/exec").submit_answers(&request).await.unwrap();
    assert_eq!(result.score(), 1);
    assert_eq!(result.total(), 2);
    assert!(!result.passed());
    assert_eq!(result.elapsed_secs(), 35);
    assert!(result.was_overtime());
    assert_eq!(result.percentage(), 50);

    let body = seen.bodies.lock().unwrap()[0].clone();
    assert_eq!(body["userId"], "alice");
    assert_eq!(body["elapsedTime"], 35);
    assert_eq!(body["isOvertime"], true);
    assert_eq!(
        body["answers"],
        json!([
            {"questionId": 1, "answer": "A"},
            {"questionId": "q-2", "answer": "D"}
        ])
    );
}

#[tokio::test]
async fn unsuccessful_envelope_is_rejected_with_message() {
    let (base, _) = spawn_grader().await;
    let err = bank(&base, "/reject")
        .fetch_questions("missing", 10)
        .await
        .unwrap_err();
    match err {
        QuestionServiceError::Rejected(message) => assert_eq!(message, "sheet not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let (base, _) = spawn_grader().await;
    let err = bank(&base, "/broken")
        .fetch_questions("Bank A", 10)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QuestionServiceError::HttpStatus(status) if status.as_u16() == 500
    ));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = bank(&format!("http://127.0.0.1:{port}"), "/exec")
        .fetch_questions("Bank A", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, QuestionServiceError::Http(_)));
}
