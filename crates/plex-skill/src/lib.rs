//! plex-skill: voice intents to media control server actions
//!
//! This crate maps intents classified by a voice platform onto HTTP calls
//! against a remote media control server and turns the server's JSON replies
//! into spoken answers. Planning and rendering are pure functions; the
//! [`Dispatcher`] ties them to a [`ControlServer`] backend.

mod error;
pub use error::{Result, SkillError};

mod types;
pub use types::{ActionResponse, PlayResult, Slots, CHANNEL_SLOT, MEDIA_SLOT, ZONE_SLOT};

mod actions;
pub use actions::{
    Action, ActionRequest, Method, PlayKind, PlayRequest, StatusQuery, TransportCommand,
};

mod intents;
pub use intents::{plan, Intent, Plan};

pub mod replies;
pub use replies::{render, Reply};

mod traits;
pub use traits::ControlServer;

mod config;
pub use config::SkillConfig;

mod dispatcher;
pub use dispatcher::{Dispatcher, Turn};

pub mod envelope;
pub use envelope::{IncomingTurn, SkillRequest, SkillResponse};

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "mock")]
pub mod mock;

/// Which control server implementation a dispatcher talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Http,
    Mock,
}

/// Create a dispatcher for the given backend
pub fn create_dispatcher(config: SkillConfig, backend: BackendKind) -> Result<Dispatcher> {
    tracing::info!(base_url = %config.base_url(), ?backend, "creating dispatcher");
    match backend {
        #[cfg(feature = "http")]
        BackendKind::Http => {
            let server = http::HttpControlServer::new(config)?;
            Ok(Dispatcher::new(std::sync::Arc::new(server)))
        }
        #[cfg(feature = "mock")]
        BackendKind::Mock => Ok(Dispatcher::new(std::sync::Arc::new(
            mock::MockControlServer::new(),
        ))),
        #[allow(unreachable_patterns)]
        other => Err(SkillError::Config(format!(
            "backend {:?} not compiled in",
            other
        ))),
    }
}

/// Dispatch a single intent by platform name
pub async fn handle_intent(dispatcher: &Dispatcher, name: &str, slots: &Slots) -> Turn {
    dispatcher.dispatch(&Intent::from_name(name), slots).await
}

/// Process a raw platform request and produce the platform response
pub async fn handle_request(dispatcher: &Dispatcher, request: &SkillRequest) -> Result<SkillResponse> {
    match request.turn()? {
        IncomingTurn::SessionEnded { reason } => {
            tracing::info!(reason = reason.as_deref().unwrap_or("unknown"), "session ended");
            Ok(SkillResponse::empty())
        }
        IncomingTurn::Intent(intent, slots) => {
            let turn = dispatcher.dispatch(&intent, &slots).await;
            Ok(SkillResponse::from_reply(&turn.reply))
        }
    }
}
