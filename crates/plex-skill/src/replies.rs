//! Spoken replies and the response-to-speech rules

use crate::actions::{Action, StatusQuery};
use crate::error::SkillError;
use crate::types::ActionResponse;

pub const LAUNCH_PROMPT: &str = "What would you like Plex to do?";
pub const RETRY_PROMPT: &str = "Sorry, please could you re-phrase that?";
pub const GENERIC_FAILURE: &str = "Sorry, something went wrong";
pub const NOT_AVAILABLE: &str = "Sorry, this information is currently not available";

/// The single answer produced for a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Final statement; the session ends
    Tell(String),
    /// Statement that keeps the session open for one more utterance
    Ask { speech: String, reprompt: String },
}

impl Reply {
    pub fn tell(speech: impl Into<String>) -> Self {
        Reply::Tell(speech.into())
    }

    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Reply::Ask {
            speech: speech.into(),
            reprompt: reprompt.into(),
        }
    }

    pub fn launch() -> Self {
        Reply::ask(LAUNCH_PROMPT, RETRY_PROMPT)
    }

    pub fn retry() -> Self {
        Reply::ask(RETRY_PROMPT, RETRY_PROMPT)
    }

    pub fn failure() -> Self {
        Reply::tell(GENERIC_FAILURE)
    }

    pub fn speech(&self) -> &str {
        match self {
            Reply::Tell(speech) | Reply::Ask { speech, .. } => speech,
        }
    }

    pub fn reprompt(&self) -> Option<&str> {
        match self {
            Reply::Tell(_) => None,
            Reply::Ask { reprompt, .. } => Some(reprompt.as_str()),
        }
    }

    pub fn ends_session(&self) -> bool {
        matches!(self, Reply::Tell(_))
    }
}

fn no_such_client(client: &str) -> Reply {
    Reply::tell(format!("Sorry, there is no client with the name: {}", client))
}

/// Turn the outcome of an action into speech. Pure; performs no I/O.
pub fn render(action: &Action, outcome: &Result<ActionResponse, SkillError>) -> Reply {
    let response = match outcome {
        Ok(response) => response,
        Err(_) => return Reply::failure(),
    };
    match action {
        Action::Status(query) => render_status(*query, response),
        Action::Transport { command, .. } => match response.missing_client() {
            Some(client) if !response.success => no_such_client(client),
            _ => Reply::tell(command.confirmation()),
        },
        Action::Play(_) => render_play(response),
    }
}

fn render_status(query: StatusQuery, response: &ActionResponse) -> Reply {
    let (prefix, items) = match query {
        StatusQuery::OnDeck => ("Currently available: ", &response.on_deck_items),
        StatusQuery::Channels => ("Currently playing: ", &response.channels),
    };
    match items {
        Some(items) if response.success => Reply::tell(format!("{}{}", prefix, items.join(", "))),
        _ => Reply::tell(NOT_AVAILABLE),
    }
}

fn render_play(response: &ActionResponse) -> Reply {
    if !response.success {
        if response.has_error() {
            return Reply::failure();
        }
        if let Some(name) = response.missing_name() {
            return Reply::tell(format!("Sorry, could not find {}", name));
        }
        if let Some(client) = response.missing_client() {
            return no_such_client(client);
        }
    }
    match &response.result {
        Some(result) => Reply::tell(format!("Playing {} in the {}", result.title, result.client)),
        None => Reply::failure(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{PlayKind, PlayRequest, TransportCommand};
    use crate::types::PlayResult;

    fn play_action() -> Action {
        Action::Play(PlayRequest {
            name: Some("Movie".into()),
            client: None,
            kind: PlayKind::Movie,
        })
    }

    fn transport(command: TransportCommand) -> Action {
        Action::Transport {
            command,
            client: None,
        }
    }

    #[test]
    fn test_transport_confirmations() {
        let expected = [
            (TransportCommand::Pause, "OK, pausing"),
            (TransportCommand::Resume, "OK, resuming"),
            (TransportCommand::Stop, "OK, stopping"),
        ];
        for (command, phrase) in expected {
            let reply = render(&transport(command), &Ok(ActionResponse::ok()));
            assert_eq!(reply, Reply::tell(phrase));
        }
    }

    #[test]
    fn test_transport_unknown_client() {
        let response = ActionResponse {
            client: Some("Attic".into()),
            ..ActionResponse::failed()
        };
        let reply = render(&transport(TransportCommand::Pause), &Ok(response));
        assert_eq!(reply.speech(), "Sorry, there is no client with the name: Attic");
    }

    #[test]
    fn test_transport_failure_without_client_still_confirms() {
        let reply = render(
            &transport(TransportCommand::Resume),
            &Ok(ActionResponse::failed()),
        );
        assert_eq!(reply.speech(), "OK, resuming");
    }

    #[test]
    fn test_play_domain_failures() {
        let error = ActionResponse {
            error: Some(serde_json::json!("x")),
            ..ActionResponse::failed()
        };
        assert_eq!(render(&play_action(), &Ok(error)), Reply::failure());

        let name = ActionResponse {
            name: Some("Movie".into()),
            ..ActionResponse::failed()
        };
        assert_eq!(
            render(&play_action(), &Ok(name)).speech(),
            "Sorry, could not find Movie"
        );

        let client = ActionResponse {
            client: Some("Kitchen".into()),
            ..ActionResponse::failed()
        };
        assert_eq!(
            render(&play_action(), &Ok(client)).speech(),
            "Sorry, there is no client with the name: Kitchen"
        );
    }

    #[test]
    fn test_play_failure_priority() {
        let all = ActionResponse {
            error: Some(serde_json::json!("x")),
            name: Some("Movie".into()),
            client: Some("Kitchen".into()),
            ..ActionResponse::failed()
        };
        assert_eq!(render(&play_action(), &Ok(all)), Reply::failure());

        let name_and_client = ActionResponse {
            name: Some("Movie".into()),
            client: Some("Kitchen".into()),
            ..ActionResponse::failed()
        };
        assert_eq!(
            render(&play_action(), &Ok(name_and_client)).speech(),
            "Sorry, could not find Movie"
        );
    }

    #[test]
    fn test_play_success() {
        let response = ActionResponse {
            result: Some(PlayResult {
                title: "Inception".into(),
                client: "Lounge".into(),
            }),
            ..ActionResponse::ok()
        };
        let reply = render(&play_action(), &Ok(response));
        assert_eq!(reply, Reply::tell("Playing Inception in the Lounge"));
        assert!(reply.ends_session());
    }

    #[test]
    fn test_play_success_without_result() {
        assert_eq!(
            render(&play_action(), &Ok(ActionResponse::ok())),
            Reply::failure()
        );
    }

    #[test]
    fn test_status_replies() {
        let on_deck = ActionResponse {
            on_deck_items: Some(vec!["A".into(), "B".into()]),
            ..ActionResponse::ok()
        };
        assert_eq!(
            render(&Action::Status(StatusQuery::OnDeck), &Ok(on_deck)).speech(),
            "Currently available: A, B"
        );

        let channels = ActionResponse {
            channels: Some(vec!["BBC One: News".into()]),
            ..ActionResponse::ok()
        };
        assert_eq!(
            render(&Action::Status(StatusQuery::Channels), &Ok(channels)).speech(),
            "Currently playing: BBC One: News"
        );

        assert_eq!(
            render(
                &Action::Status(StatusQuery::OnDeck),
                &Ok(ActionResponse::failed())
            )
            .speech(),
            NOT_AVAILABLE
        );
        assert_eq!(
            render(&Action::Status(StatusQuery::Channels), &Ok(ActionResponse::ok())).speech(),
            NOT_AVAILABLE
        );
    }

    #[test]
    fn test_transport_error_is_generic_failure() {
        let err = Err(SkillError::Transport("connection refused".into()));
        assert_eq!(render(&play_action(), &err), Reply::failure());
        assert_eq!(
            render(&Action::Status(StatusQuery::OnDeck), &err),
            Reply::failure()
        );
    }

    #[test]
    fn test_ask_keeps_session_open() {
        let reply = Reply::launch();
        assert_eq!(reply.speech(), LAUNCH_PROMPT);
        assert_eq!(reply.reprompt(), Some(RETRY_PROMPT));
        assert!(!reply.ends_session());
    }
}
