//! Intent dispatcher: one turn in, one reply out

use crate::error::SkillError;
use crate::intents::{plan, Intent, Plan};
use crate::replies::{render, Reply};
use crate::traits::ControlServer;
use crate::types::Slots;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of a dispatched turn
#[derive(Debug)]
pub struct Turn {
    /// What to say back to the user
    pub reply: Reply,
    /// Transport failure hit while performing the action, if any
    pub failure: Option<SkillError>,
}

/// Routes intents to the control server and speaks the outcome.
///
/// Holds no per-turn state; one instance serves every invocation.
#[derive(Clone)]
pub struct Dispatcher {
    server: Arc<dyn ControlServer>,
}

impl Dispatcher {
    pub fn new(server: Arc<dyn ControlServer>) -> Self {
        Self { server }
    }

    pub fn backend(&self) -> &'static str {
        self.server.backend()
    }

    /// Handle one intent, issuing at most one control server request.
    pub async fn dispatch(&self, intent: &Intent, slots: &Slots) -> Turn {
        info!(intent = intent.name(), slots = slots.len(), "dispatching intent");

        let action = match plan(intent, slots) {
            Plan::Reply(reply) => {
                if let Intent::Unhandled(name) = intent {
                    warn!(intent = %name, "unhandled intent");
                }
                return Turn {
                    reply,
                    failure: None,
                };
            }
            Plan::Perform(action) => action,
        };

        let request = action.request();
        tracing::debug!(?request, backend = self.server.backend(), "performing action");
        let outcome = self.server.perform(&request).await;

        match &outcome {
            Err(e) => error!(action = action.name(), "control server request failed: {}", e),
            Ok(resp) if !resp.success => {
                warn!(action = action.name(), response = ?resp, "control server reported failure")
            }
            Ok(_) => {}
        }

        let reply = render(&action, &outcome);
        Turn {
            reply,
            failure: outcome.err(),
        }
    }
}
