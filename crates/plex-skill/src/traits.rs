use crate::actions::ActionRequest;
use crate::error::Result;
use crate::types::ActionResponse;
use async_trait::async_trait;

/// Remote media control server
#[async_trait]
pub trait ControlServer: Send + Sync {
    /// Perform one request and decode the server's JSON reply
    async fn perform(&self, request: &ActionRequest) -> Result<ActionResponse>;

    /// Short backend name used in logs
    fn backend(&self) -> &'static str;
}
