use thiserror::Error;

pub type Result<T, E = SkillError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed control server response: {0}")]
    MalformedResponse(String),
    #[error("invalid platform request: {0}")]
    Envelope(String),
}

impl SkillError {
    /// True for failures of the HTTP exchange itself, as opposed to bad input.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SkillError::Transport(_) | SkillError::MalformedResponse(_)
        )
    }
}

