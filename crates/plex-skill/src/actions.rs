//! Outbound control server actions

use serde::{Deserialize, Serialize};

/// Read-only listings spoken back to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusQuery {
    /// Items on deck in the media library
    OnDeck,
    /// What the broadcast channels are currently showing
    Channels,
}

impl StatusQuery {
    pub fn path(&self) -> &'static str {
        match self {
            StatusQuery::OnDeck => "ondeck",
            StatusQuery::Channels => "channels",
        }
    }
}

/// Playback transport commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Pause,
    Resume,
    Stop,
}

impl TransportCommand {
    pub fn path(&self) -> &'static str {
        match self {
            TransportCommand::Pause => "pause",
            TransportCommand::Resume => "resume",
            TransportCommand::Stop => "stop",
        }
    }

    /// Canned confirmation spoken on completion
    pub fn confirmation(&self) -> &'static str {
        match self {
            TransportCommand::Pause => "OK, pausing",
            TransportCommand::Resume => "OK, resuming",
            TransportCommand::Stop => "OK, stopping",
        }
    }
}

/// Kind of media a play request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayKind {
    #[serde(rename = "continue")]
    Continue,
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "iPlayer")]
    IPlayer,
}

/// JSON body of `POST play`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub name: Option<String>,
    pub client: Option<String>,
    #[serde(rename = "type")]
    pub kind: PlayKind,
}

/// One remote call against the control server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Status(StatusQuery),
    Transport {
        command: TransportCommand,
        client: Option<String>,
    },
    Play(PlayRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Wire-level description of an [`Action`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub method: Method,
    /// Path relative to the configured base URL
    pub path: &'static str,
    /// Value for the `client` query parameter
    pub client: Option<String>,
    pub body: Option<PlayRequest>,
}

impl Action {
    pub fn request(&self) -> ActionRequest {
        match self {
            Action::Status(query) => ActionRequest {
                method: Method::Get,
                path: query.path(),
                client: None,
                body: None,
            },
            Action::Transport { command, client } => ActionRequest {
                method: Method::Get,
                path: command.path(),
                client: client.clone(),
                body: None,
            },
            Action::Play(body) => ActionRequest {
                method: Method::Post,
                path: "play",
                client: None,
                body: Some(body.clone()),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Status(query) => query.path(),
            Action::Transport { command, .. } => command.path(),
            Action::Play(_) => "play",
        }
    }
}
