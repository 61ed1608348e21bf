//! Voice platform request and response JSON
//!
//! Only the parts of the platform schema the skill reads or writes are
//! modelled; unknown fields are ignored on input.

use crate::error::{Result, SkillError};
use crate::intents::Intent;
use crate::replies::Reply;
use crate::types::Slots;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const RESPONSE_VERSION: &str = "1.0";

/// Incoming platform request
#[derive(Debug, Clone, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub session: Option<Session>,
    pub request: RequestBody,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub request_id: Option<String>,
    /// RFC 3339 stamp; kept raw so a bad value never rejects the request
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentBody>,
    /// Why the session ended, for session-ended requests
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentBody {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, SlotBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// What the platform is asking the skill to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingTurn {
    /// Dispatch this intent
    Intent(Intent, Slots),
    /// The session is over; no speech is allowed in the answer
    SessionEnded { reason: Option<String> },
}

impl SkillRequest {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| SkillError::Envelope(e.to_string()))
    }

    pub fn turn(&self) -> Result<IncomingTurn> {
        let request = &self.request;
        match request.kind.as_str() {
            "LaunchRequest" => Ok(IncomingTurn::Intent(Intent::Launch, Slots::new())),
            "SessionEndedRequest" => Ok(IncomingTurn::SessionEnded {
                reason: request.reason.clone(),
            }),
            "IntentRequest" => {
                let Some(intent) = request.intent.as_ref() else {
                    return Ok(IncomingTurn::Intent(
                        Intent::Unhandled(request.kind.clone()),
                        Slots::new(),
                    ));
                };
                let slots = intent
                    .slots
                    .iter()
                    .filter_map(|(key, slot)| {
                        let value = slot.value.clone()?;
                        Some((slot.name.clone().unwrap_or_else(|| key.clone()), value))
                    })
                    .collect();
                Ok(IncomingTurn::Intent(Intent::from_name(&intent.name), slots))
            }
            other => Ok(IncomingTurn::Intent(
                Intent::Unhandled(other.to_string()),
                Slots::new(),
            )),
        }
    }

    /// When the platform stamped the request, if the stamp parses
    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        let raw = self.request.timestamp.as_deref()?;
        OffsetDateTime::parse(raw, &Rfc3339).ok()
    }

    /// Seconds between the platform stamping the request and `now`
    pub fn age_seconds(&self, now: OffsetDateTime) -> Option<f64> {
        self.timestamp().map(|ts| (now - ts).as_seconds_f64())
    }
}

/// Outgoing platform response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillResponse {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

fn plain_text(text: &str) -> OutputSpeech {
    OutputSpeech {
        kind: "PlainText",
        text: text.to_string(),
    }
}

impl SkillResponse {
    pub fn from_reply(reply: &Reply) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: Some(plain_text(reply.speech())),
                reprompt: reply.reprompt().map(|r| Reprompt {
                    output_speech: plain_text(r),
                }),
                should_end_session: reply.ends_session(),
            },
        }
    }

    /// Acknowledge a request that must not be answered with speech
    pub fn empty() -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: None,
                reprompt: None,
                should_end_session: true,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
