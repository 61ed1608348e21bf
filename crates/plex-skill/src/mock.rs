//! Scripted control server for development and testing

use crate::actions::ActionRequest;
use crate::error::{Result, SkillError};
use crate::traits::ControlServer;
use crate::types::{ActionResponse, PlayResult};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Canned outcome for one request
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Respond(ActionResponse),
    TransportFailure(String),
}

/// Mock control server.
///
/// Outcomes queued per path are consumed first; once a path's queue is empty
/// the default outcome for that path is used. Every request is recorded.
pub struct MockControlServer {
    queued: Mutex<HashMap<&'static str, VecDeque<MockOutcome>>>,
    requests: Mutex<Vec<ActionRequest>>,
}

impl MockControlServer {
    pub fn new() -> Self {
        Self {
            queued: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response for the next request on `path`
    pub fn respond(self, path: &'static str, response: ActionResponse) -> Self {
        self.push(path, MockOutcome::Respond(response));
        self
    }

    /// Queue a transport failure for the next request on `path`
    pub fn fail(self, path: &'static str, reason: impl Into<String>) -> Self {
        self.push(path, MockOutcome::TransportFailure(reason.into()));
        self
    }

    fn push(&self, path: &'static str, outcome: MockOutcome) {
        if let Ok(mut queued) = self.queued.lock() {
            queued.entry(path).or_default().push_back(outcome);
        }
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<ActionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn default_outcome(request: &ActionRequest) -> ActionResponse {
        match request.path {
            "ondeck" => ActionResponse {
                on_deck_items: Some(vec!["Mock Show S01E02".to_string()]),
                ..ActionResponse::ok()
            },
            "channels" => ActionResponse {
                channels: Some(vec!["BBC One: Mock News".to_string()]),
                ..ActionResponse::ok()
            },
            "play" => {
                let body = request.body.as_ref();
                ActionResponse {
                    result: Some(PlayResult {
                        title: body
                            .and_then(|b| b.name.clone())
                            .unwrap_or_else(|| "Mock Movie".to_string()),
                        client: body
                            .and_then(|b| b.client.clone())
                            .unwrap_or_else(|| "Living Room".to_string()),
                    }),
                    ..ActionResponse::ok()
                }
            }
            _ => ActionResponse::ok(),
        }
    }
}

impl Default for MockControlServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ControlServer for MockControlServer {
    async fn perform(&self, request: &ActionRequest) -> Result<ActionResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let next = self
            .queued
            .lock()
            .ok()
            .and_then(|mut q| q.get_mut(request.path).and_then(VecDeque::pop_front));
        match next {
            Some(MockOutcome::Respond(response)) => Ok(response),
            Some(MockOutcome::TransportFailure(reason)) => Err(SkillError::Transport(reason)),
            None => Ok(Self::default_outcome(request)),
        }
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Method;

    fn get(path: &'static str) -> ActionRequest {
        ActionRequest {
            method: Method::Get,
            path,
            client: None,
            body: None,
        }
    }

    #[tokio::test]
    async fn test_queue_then_default() {
        let server = MockControlServer::new()
            .fail("pause", "connection reset")
            .respond("pause", ActionResponse::failed());

        assert!(server.perform(&get("pause")).await.is_err());
        assert!(!server.perform(&get("pause")).await.unwrap().success);
        assert!(server.perform(&get("pause")).await.unwrap().success);
        assert_eq!(server.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_default_listings() {
        let server = MockControlServer::default();
        let resp = server.perform(&get("ondeck")).await.unwrap();
        assert_eq!(resp.on_deck_items.map(|v| v.len()), Some(1));
    }
}
