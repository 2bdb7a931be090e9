// src/integrations/notion.rs

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    config::NotionConfig,
    integrations::{IntegrationError, LeadMirror, rejection},
    models::lead::Lead,
};

pub const NOTION_PAGES_URL: &str = "https://api.notion.com/v1/pages";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Mirrors leads into a Notion database.
pub struct NotionMirror {
    client: reqwest::Client,
    config: NotionConfig,
    endpoint: String,
}

#[derive(Deserialize)]
struct PageResponse {
    id: String,
}

impl NotionMirror {
    pub fn new(client: reqwest::Client, config: NotionConfig) -> Self {
        Self {
            client,
            config,
            endpoint: NOTION_PAGES_URL.to_string(),
        }
    }

    /// Points the client at another pages endpoint (used against local fakes).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Page body for one lead.
pub fn page_payload(database_id: &str, lead: &Lead) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Name": { "title": [{ "text": { "content": lead.name } }] },
            "Email": { "email": lead.email },
            "Company": {
                "rich_text": [{ "text": { "content": lead.company.as_deref().unwrap_or("") } }]
            },
            "Source": { "select": { "name": lead.source } },
            "Status": { "select": { "name": "New" } },
            "Date Added": { "date": { "start": lead.created_at.to_rfc3339() } }
        }
    })
}

#[async_trait]
impl LeadMirror for NotionMirror {
    async fn mirror_lead(&self, lead: &Lead) -> Result<String, IntegrationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&page_payload(&self.config.database_id, lead))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let page: PageResponse = response.json().await?;
        tracing::info!("Lead {} mirrored to Notion page {}", lead.id, page.id);
        Ok(page.id)
    }
}
