use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    integrations::{LeadMirror, Mailer},
    store::{LeadStore, ProfileStore},
};

#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub leads: Arc<dyn LeadStore>,
    /// Welcome email sender. `None` when Resend is not configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// CRM mirror. `None` when Notion is not configured.
    pub mirror: Option<Arc<dyn LeadMirror>>,
    pub config: Config,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
