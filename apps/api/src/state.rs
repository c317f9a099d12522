use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::FlowSettings;
use crate::llm_client::TextGenerator;
use crate::models::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. Default: `LlmClient` against the Anthropic API.
    pub llm: Arc<dyn TextGenerator>,
    /// The single interactive session. Handlers hold the lock for a whole
    /// action, so actions never interleave.
    pub session: Arc<Mutex<Session>>,
    pub settings: FlowSettings,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>, settings: FlowSettings) -> Self {
        Self {
            llm,
            session: Arc::new(Mutex::new(Session::default())),
            settings,
        }
    }
}
