//! Deferred install handles.
//!
//! The platform hands out a one-shot object when the app becomes installable.
//! `prompt` consumes the box, so a handle can never be prompted twice.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::{CardError, CardResult};

/// The user's answer to the platform install prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// Platform-provided one-shot install trigger
pub trait DeferredInstallHandle: Send {
    /// Show the platform prompt and wait for the user's choice.
    ///
    /// The future may never resolve if the user ignores the prompt.
    fn prompt(self: Box<Self>) -> BoxFuture<'static, CardResult<InstallOutcome>>;
}

/// Handle whose prompt resolves immediately with a fixed result
#[derive(Debug, Clone)]
pub struct ImmediatePrompt {
    result: Result<InstallOutcome, String>,
}

impl ImmediatePrompt {
    pub fn accepting() -> Self {
        Self {
            result: Ok(InstallOutcome::Accepted),
        }
    }

    pub fn dismissing() -> Self {
        Self {
            result: Ok(InstallOutcome::Dismissed),
        }
    }

    /// A handle whose prompt call raises a platform error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

impl DeferredInstallHandle for ImmediatePrompt {
    fn prompt(self: Box<Self>) -> BoxFuture<'static, CardResult<InstallOutcome>> {
        let result = self.result.map_err(CardError::Platform);
        async move { result }.boxed()
    }
}

/// Handle resolved from elsewhere, e.g. a UI dialog standing in for the
/// platform prompt. Dropping the sender counts as a platform failure.
pub struct ChannelPrompt {
    choice: oneshot::Receiver<InstallOutcome>,
}

impl ChannelPrompt {
    pub fn pair() -> (oneshot::Sender<InstallOutcome>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { choice: rx })
    }
}

impl DeferredInstallHandle for ChannelPrompt {
    fn prompt(self: Box<Self>) -> BoxFuture<'static, CardResult<InstallOutcome>> {
        let choice = self.choice;
        async move {
            choice
                .await
                .map_err(|_| CardError::Platform("install prompt abandoned".to_string()))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_immediate_prompt() {
        let handle: Box<dyn DeferredInstallHandle> = Box::new(ImmediatePrompt::accepting());
        assert_eq!(handle.prompt().await.unwrap(), InstallOutcome::Accepted);

        let failing: Box<dyn DeferredInstallHandle> = Box::new(ImmediatePrompt::failing("boom"));
        assert!(matches!(failing.prompt().await, Err(CardError::Platform(_))));
    }

    #[tokio::test]
    async fn test_channel_prompt() {
        let (tx, handle) = ChannelPrompt::pair();
        let pending = Box::new(handle).prompt();
        tx.send(InstallOutcome::Dismissed).unwrap();
        assert_eq!(pending.await.unwrap(), InstallOutcome::Dismissed);

        let (tx, handle) = ChannelPrompt::pair();
        drop(tx);
        assert!(Box::new(handle).prompt().await.is_err());
    }
}
