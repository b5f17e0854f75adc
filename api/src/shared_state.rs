use std::sync::Arc;

use sports_hub_auth::session::SessionManager;

use crate::{admin::Templates, auth::SessionStore};

pub struct InnerState {
    pub production: bool,
    pub db: sports_hub_db::Pool,
    pub sessions: SessionManager<SessionStore>,
    pub templates: Templates,
}

pub type AppState = Arc<InnerState>;
