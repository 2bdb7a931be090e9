// tests/api_tests.rs

mod common;

use std::sync::{Arc, atomic::Ordering};

use common::{FakeMailer, FakeMirror, spawn_app, spawn_app_with};
use impact_backend::{models::lead::EmailStatus, store::LeadStore};
use serde_json::{Value, json};

fn uniform_answers(prefix: &str, count: usize, option: &str) -> Value {
    let map: serde_json::Map<String, Value> = (1..=count)
        .map(|i| (format!("{}{}", prefix, i), json!(option)))
        .collect();
    Value::Object(map)
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/random_path_that_does_not_exist"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn list_and_get_quizzes() {
    let app = spawn_app().await;

    let body: Value = app
        .client
        .get(app.url("/api/quizzes"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let response = app
        .client
        .get(app.url("/api/quizzes/money-leak"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let questions = body["data"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 7);
    // Weights stay on the server.
    assert!(questions[0]["options"][0].get("weight").is_none());

    let response = app
        .client
        .get(app.url("/api/quizzes/no-such-quiz"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn submit_leadership_scorecard() {
    let app = spawn_app().await;
    let mut answers = uniform_answers("q", 10, "4");
    answers["q1"] = json!("5");
    answers["q2"] = json!("5");

    let response = app
        .client
        .post(app.url("/api/quizzes/leadership-scorecard/submit"))
        .json(&json!({ "answers": answers }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["total_score"], 42);
    assert_eq!(body["data"]["percentage"], 84);
    assert_eq!(body["data"]["result"]["label"], "Strong Leader");
    assert!(body["data"].get("lead").is_none());
}

#[tokio::test]
async fn incomplete_submission_is_400() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/quizzes/money-leak/submit"))
        .json(&json!({ "answers": { "q1": "3" } }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("q7"));
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/waitlist"))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn persona_quiz_returns_persona_details() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/quizzes/impact-persona/submit"))
        .json(&json!({ "answers": uniform_answers("", 6, "d") }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["top_category"], "tech_innovator");
    assert_eq!(body["data"]["persona"]["name"], "Tech Innovator");
}

#[tokio::test]
async fn quiz_submission_captures_lead_with_result() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/quizzes/money-leak/submit"))
        .json(&json!({
            "answers": uniform_answers("q", 7, "5"),
            "lead": { "name": "Dana", "email": "Dana@Example.com", "company": "Acme" }
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["lead"]["email"], "dana@example.com");
    assert_eq!(body["data"]["lead"]["email_sent"], true);

    let lead = app
        .store
        .find_lead_by_email("dana@example.com")
        .await
        .unwrap()
        .expect("lead stored");
    assert_eq!(lead.source, "money-leak");
    assert_eq!(lead.quiz_slug.as_deref(), Some("money-leak"));
    assert_eq!(lead.quiz_score, Some(31));
    assert_eq!(lead.quiz_category.as_deref(), Some("Severe Leak"));
}

#[tokio::test]
async fn retaking_quiz_with_registered_email_keeps_result() {
    let app = spawn_app().await;
    let submission = json!({
        "answers": uniform_answers("q", 7, "5"),
        "lead": { "name": "Dana", "email": "dana@example.com" }
    });

    let first = app
        .client
        .post(app.url("/api/quizzes/money-leak/submit"))
        .json(&submission)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status().as_u16(), 200);
    let body: Value = first.json().await.unwrap();
    assert_eq!(body["data"]["lead"]["captured"], true);

    let second = app
        .client
        .post(app.url("/api/quizzes/money-leak/submit"))
        .json(&submission)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status().as_u16(), 200);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["data"]["total_score"], 31);
    assert_eq!(body["data"]["result"]["label"], "Severe Leak");
    assert_eq!(body["data"]["lead"]["captured"], false);
    assert_eq!(body["data"]["lead"]["reason"], "This email is already registered");
    assert!(body["data"]["lead"].get("email").is_none());

    assert_eq!(app.store.lead_count().await, 1);
    assert_eq!(app.mailer.as_ref().unwrap().sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn waitlist_signup_runs_side_effects() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/waitlist"))
        .json(&json!({
            "name": "  Avery  ",
            "email": "  Avery@Example.COM ",
            "company": "Impact Co"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["name"], "Avery");
    assert_eq!(data["email"], "avery@example.com");
    assert_eq!(data["saved_to_database"], true);
    assert_eq!(data["saved_to_notion"], true);
    assert_eq!(data["email_sent"], true);

    assert_eq!(app.mirror.as_ref().unwrap().calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *app.mailer.as_ref().unwrap().sent.lock().unwrap(),
        vec!["avery@example.com".to_string()]
    );

    let lead = app
        .store
        .find_lead_by_email("avery@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(lead.auto_responder_sent);
    assert_eq!(lead.source, "website");

    let logs = app.store.email_logs().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, EmailStatus::Sent);
    assert_eq!(logs[0].provider_message_id.as_deref(), Some("msg_1"));
}

#[tokio::test]
async fn duplicate_email_in_any_case_is_409() {
    let app = spawn_app().await;
    let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);

    let first = app
        .client
        .post(app.url("/api/waitlist"))
        .json(&json!({ "name": "First", "email": email }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status().as_u16(), 200);

    let second = app
        .client
        .post(app.url("/api/waitlist"))
        .json(&json!({ "name": "Second", "email": email.to_uppercase() }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(second.status().as_u16(), 409);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(app.store.lead_count().await, 1);
}

#[tokio::test]
async fn waitlist_validation_errors_are_400() {
    let app = spawn_app().await;

    for payload in [
        json!({ "name": "", "email": "a@b.co" }),
        json!({ "name": "   ", "email": "a@b.co" }),
        json!({ "name": "Ann" }),
        json!({ "name": "Ann", "email": "not-an-email" }),
        json!({ "name": "Ann", "email": "a b@c.co" }),
    ] {
        let response = app
            .client
            .post(app.url("/api/waitlist"))
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 400, "payload {}", payload);
    }

    assert_eq!(app.store.lead_count().await, 0);
}

#[tokio::test]
async fn email_failure_still_returns_200() {
    let mailer = Arc::new(FakeMailer {
        fail: true,
        ..Default::default()
    });
    let app = spawn_app_with(Some(mailer), Some(Arc::new(FakeMirror::default()))).await;

    let response = app
        .client
        .post(app.url("/api/waitlist"))
        .json(&json!({ "name": "Robin", "email": "robin@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email_sent"], false);
    assert_eq!(body["data"]["saved_to_database"], true);
    assert!(
        body["data"]["email_details"]
            .as_str()
            .unwrap()
            .contains("domain not verified")
    );

    assert_eq!(app.store.lead_count().await, 1);
    let lead = app
        .store
        .find_lead_by_email("robin@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!lead.auto_responder_sent);

    let logs = app.store.email_logs().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, EmailStatus::Failed);
}

#[tokio::test]
async fn unconfigured_integrations_are_reported() {
    let app = spawn_app_with(None, None).await;

    let response = app
        .client
        .post(app.url("/api/waitlist"))
        .json(&json!({ "name": "Sam", "email": "sam@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["saved_to_notion"], false);
    assert_eq!(body["data"]["email_sent"], false);
    assert!(app.store.email_logs().await.is_empty());
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/waitlist"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 405);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Method not allowed");

    let response = app
        .client
        .put(app.url("/api/quizzes/money-leak/submit"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 405);

    let response = app
        .client
        .delete(app.url("/api/leaderboard"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 405);
}

#[tokio::test]
async fn plans_and_access_checks() {
    let app = spawn_app().await;

    let body: Value = app
        .client
        .get(app.url("/api/plans"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    let plans = body["data"].as_array().unwrap();
    assert_eq!(plans.len(), 4);
    assert_eq!(plans[3]["plan"], "enterprise-plus");

    let body: Value = app
        .client
        .get(app.url("/api/plans/demo/access?feature=roi_tracker&usage=45"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["has_access"], true);
    assert_eq!(body["data"]["has_reached_limit"], false);
    assert_eq!(body["data"]["usage"]["state"], "approaching");
    assert_eq!(body["data"]["usage"]["remaining"], 5);

    let body: Value = app
        .client
        .get(app.url("/api/plans/gold/access?feature=team_collaboration"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["plan"], "demo");
    assert_eq!(body["data"]["has_access"], false);
    assert_eq!(body["data"]["upgrade_to"]["plan"], "enterprise");

    let response = app
        .client
        .get(app.url("/api/plans/starter/access?feature=warp_drive"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
}
