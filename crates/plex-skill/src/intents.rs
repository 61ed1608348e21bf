//! Intent catalogue and the intent-to-action table

use crate::actions::{Action, PlayKind, PlayRequest, StatusQuery, TransportCommand};
use crate::replies::Reply;
use crate::types::{Slots, CHANNEL_SLOT, MEDIA_SLOT};

/// Intents the skill understands, classified by the voice platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Session opened without a specific request
    Launch,
    OnDeck,
    ChannelsWhatsOn,
    Pause,
    Resume,
    Stop,
    ContinueMedia,
    Movie,
    IplayerChannel,
    /// Anything the skill does not recognize, keeping the platform name
    Unhandled(String),
}

impl Intent {
    pub const KNOWN: [Intent; 9] = [
        Intent::Launch,
        Intent::OnDeck,
        Intent::ChannelsWhatsOn,
        Intent::Pause,
        Intent::Resume,
        Intent::Stop,
        Intent::ContinueMedia,
        Intent::Movie,
        Intent::IplayerChannel,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "LaunchRequest" => Intent::Launch,
            "OnDeckIntent" => Intent::OnDeck,
            "IplayerWhatsOnIntent" => Intent::ChannelsWhatsOn,
            "AMAZON.PauseIntent" => Intent::Pause,
            "AMAZON.ResumeIntent" => Intent::Resume,
            "AMAZON.StopIntent" => Intent::Stop,
            "ContinueMediaIntent" => Intent::ContinueMedia,
            "MovieIntent" => Intent::Movie,
            "IplayerChannelIntent" => Intent::IplayerChannel,
            other => Intent::Unhandled(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Intent::Launch => "LaunchRequest",
            Intent::OnDeck => "OnDeckIntent",
            Intent::ChannelsWhatsOn => "IplayerWhatsOnIntent",
            Intent::Pause => "AMAZON.PauseIntent",
            Intent::Resume => "AMAZON.ResumeIntent",
            Intent::Stop => "AMAZON.StopIntent",
            Intent::ContinueMedia => "ContinueMediaIntent",
            Intent::Movie => "MovieIntent",
            Intent::IplayerChannel => "IplayerChannelIntent",
            Intent::Unhandled(name) => name,
        }
    }
}

/// What the dispatcher does for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Answer without contacting the control server
    Reply(Reply),
    /// Call the control server, then render its answer
    Perform(Action),
}

/// Map an intent and its slots onto a plan. Pure; performs no I/O.
pub fn plan(intent: &Intent, slots: &Slots) -> Plan {
    match intent {
        Intent::Launch => Plan::Reply(Reply::launch()),
        Intent::Unhandled(_) => Plan::Reply(Reply::retry()),
        Intent::OnDeck => Plan::Perform(Action::Status(StatusQuery::OnDeck)),
        Intent::ChannelsWhatsOn => Plan::Perform(Action::Status(StatusQuery::Channels)),
        Intent::Pause => transport(TransportCommand::Pause, slots),
        Intent::Resume => transport(TransportCommand::Resume, slots),
        Intent::Stop => transport(TransportCommand::Stop, slots),
        Intent::ContinueMedia => play(PlayKind::Continue, MEDIA_SLOT, slots),
        Intent::Movie => play(PlayKind::Movie, MEDIA_SLOT, slots),
        Intent::IplayerChannel => play(PlayKind::IPlayer, CHANNEL_SLOT, slots),
    }
}

fn transport(command: TransportCommand, slots: &Slots) -> Plan {
    Plan::Perform(Action::Transport {
        command,
        client: slots.zone().map(str::to_string),
    })
}

fn play(kind: PlayKind, title_slot: &str, slots: &Slots) -> Plan {
    Plan::Perform(Action::Play(PlayRequest {
        name: slots.get(title_slot).map(str::to_string),
        client: slots.zone().map(str::to_string),
        kind,
    }))
}
