//! Outbound reply channel

use crate::error::Result;
use async_trait::async_trait;

/// Where a handler writes its replies.
///
/// One sink is bound to one conversation; replies are delivered in the
/// order they are sent.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Sink that keeps every delivered reply in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    replies: std::sync::Mutex<Vec<String>>,
    attempts: std::sync::atomic::AtomicUsize,
    fail_at: Option<usize>,
}

#[cfg(test)]
impl RecordingSink {
    /// Rejects the send with this zero-based index
    pub(crate) fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub(crate) fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, text: &str) -> Result<()> {
        let attempt = self
            .attempts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail_at == Some(attempt) {
            return Err(std::io::Error::other("chat unavailable").into());
        }

        self.replies.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
