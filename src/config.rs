// src/config.rs

use std::env;

use dotenvy::dotenv;
use url::Url;

/// Points awarded when a user completes the persona quiz.
pub const ONBOARDING_BONUS_POINTS: i64 = 100;

/// Impact points required per level.
pub const POINTS_PER_LEVEL: i64 = 500;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

pub const WELCOME_EMAIL_SUBJECT: &str = "Welcome to the Impact community!";

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When absent the server runs on in-memory stores.
    pub database_url: Option<String>,
    /// Shared secret used to verify bearer tokens from the identity provider.
    pub jwt_secret: String,
    pub rust_log: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub resend: Option<ResendConfig>,
    pub notion: Option<NotionConfig>,
}

#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    pub base_url: String,
    pub from: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub api_key: String,
    pub database_id: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = optional("DATABASE_URL");

        let jwt_secret = env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .map(|p| p.parse::<u16>().expect("PORT must be a valid port number"))
            .unwrap_or(3000);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| {
                Url::parse(o).expect("ALLOWED_ORIGINS must contain valid URLs");
                o.to_string()
            })
            .collect();

        let resend = optional("RESEND_API_KEY").map(|api_key| {
            let base_url = env::var("RESEND_BASE_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string());
            Url::parse(&base_url).expect("RESEND_BASE_URL must be a valid URL");
            ResendConfig {
                api_key,
                base_url: base_url.trim_end_matches('/').to_string(),
                from: env::var("EMAIL_FROM")
                    .unwrap_or_else(|_| "Impact <hello@impact.example>".to_string()),
                reply_to: optional("EMAIL_REPLY_TO"),
            }
        });

        // Both values are needed for the mirror to be usable.
        let notion = match (optional("NOTION_API_KEY"), optional("NOTION_DATABASE_ID")) {
            (Some(api_key), Some(database_id)) => Some(NotionConfig {
                api_key,
                database_id,
            }),
            _ => None,
        };

        Self {
            database_url,
            jwt_secret,
            rust_log,
            port,
            allowed_origins,
            resend,
            notion,
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
