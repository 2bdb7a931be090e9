// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use impact_backend::{
    config::Config,
    integrations::{IntegrationError, LeadMirror, Mailer, SentEmail},
    models::{lead::Lead, persona::Persona, profile::NewPointActivity, profile::UpsertProfileRequest},
    routes,
    state::AppState,
    store::{MemoryStore, ProfileStore},
    utils::jwt::sign_jwt,
};

pub const JWT_SECRET: &str = "test_secret_for_integration_tests";

/// Records welcome emails instead of sending them.
#[derive(Default)]
pub struct FakeMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<String>>,
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send_welcome(&self, lead: &Lead) -> Result<SentEmail, IntegrationError> {
        if self.fail {
            return Err(IntegrationError::Rejected {
                status: 422,
                message: "domain not verified".to_string(),
            });
        }
        self.sent.lock().unwrap().push(lead.email.clone());
        Ok(SentEmail {
            message_id: Some(format!("msg_{}", lead.id)),
        })
    }
}

#[derive(Default)]
pub struct FakeMirror {
    pub calls: AtomicUsize,
}

#[async_trait]
impl LeadMirror for FakeMirror {
    async fn mirror_lead(&self, lead: &Lead) -> Result<String, IntegrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("page_{}", lead.id))
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub mailer: Option<Arc<FakeMailer>>,
    pub mirror: Option<Arc<FakeMirror>>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn token(&self, user_id: &str) -> String {
        sign_jwt(user_id, Some("Test User"), JWT_SECRET, 600).expect("Failed to sign token")
    }

    /// Creates a profile holding `points`, optionally onboarded as `persona`.
    /// Onboarding adds its own 100 point bonus on top.
    pub async fn seed_profile(&self, user_id: &str, points: i64, persona: Option<Persona>) {
        self.store
            .upsert_profile(
                user_id,
                &UpsertProfileRequest {
                    display_name: Some(user_id.to_string()),
                    avatar_url: None,
                },
            )
            .await
            .expect("Failed to seed profile");

        if let Some(persona) = persona {
            self.store
                .complete_onboarding(user_id, persona, &activity(100))
                .await
                .expect("Failed to seed persona");
        }
        if points > 0 {
            self.store
                .award_points(user_id, &activity(points))
                .await
                .expect("Failed to seed points");
        }
    }
}

fn activity(points: i64) -> NewPointActivity {
    NewPointActivity {
        points,
        activity_type: "seed".to_string(),
        description: None,
        metadata: serde_json::json!({}),
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: JWT_SECRET.to_string(),
        rust_log: "error".to_string(),
        port: 0,
        allowed_origins: vec!["http://localhost:3000".to_string()],
        resend: None,
        notion: None,
    }
}

/// Spawns the app on a random port over in-memory storage.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(Some(Arc::new(FakeMailer::default())), Some(Arc::new(FakeMirror::default()))).await
}

pub async fn spawn_app_with(
    mailer: Option<Arc<FakeMailer>>,
    mirror: Option<Arc<FakeMirror>>,
) -> TestApp {
    let store = Arc::new(MemoryStore::new());

    let state = AppState {
        profiles: store.clone(),
        leads: store.clone(),
        mailer: mailer.clone().map(|m| m as Arc<dyn Mailer>),
        mirror: mirror.clone().map(|m| m as Arc<dyn LeadMirror>),
        config: test_config(),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        store,
        mailer,
        mirror,
        client: reqwest::Client::new(),
    }
}
