//! User-visible notices (alerts and confirmations).
//!
//! View models never print. They hand a [`Notice`] to an injected
//! [`Notifier`]; the renderer decides how to show it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Default number of notices kept by [`NoticeLog`].
pub const DEFAULT_NOTICE_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// A failure the user must acknowledge.
    Alert,
    /// A success message.
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Alert,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn confirmation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Confirmation,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn is_alert(&self) -> bool {
        self.kind == NoticeKind::Alert
    }
}

/// Receives notices raised by the view models.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: Notice);
}

/// Bounded, oldest-first history of notices.
///
/// Every notice is also emitted as a tracing event. When the history is full
/// the oldest entry is dropped.
#[derive(Debug)]
pub struct NoticeLog {
    capacity: usize,
    history: RwLock<VecDeque<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_NOTICE_CAPACITY)
    }

    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            history: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the history, oldest first.
    pub async fn recent(&self) -> Vec<Notice> {
        self.history.read().await.iter().cloned().collect()
    }

    /// Removes and returns every notice not yet taken.
    pub async fn drain(&self) -> Vec<Notice> {
        self.history.write().await.drain(..).collect()
    }

    pub async fn alerts(&self) -> Vec<Notice> {
        self.history
            .read()
            .await
            .iter()
            .filter(|n| n.is_alert())
            .cloned()
            .collect()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NoticeLog {
    async fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Alert => tracing::warn!(text = %notice.message, "Alert raised"),
            NoticeKind::Confirmation => tracing::info!(text = %notice.message, "Confirmation"),
        }

        let mut history = self.history.write().await;
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_history_is_bounded() {
        let log = NoticeLog::with_capacity(2);
        log.notify(Notice::alert("one")).await;
        log.notify(Notice::confirmation("two")).await;
        log.notify(Notice::alert("three")).await;

        let messages: Vec<_> = log.recent().await.into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn test_drain_empties_history() {
        let log = NoticeLog::new();
        log.notify(Notice::confirmation("ok")).await;

        assert_eq!(log.drain().await.len(), 1);
        assert!(log.recent().await.is_empty());
    }

    #[tokio::test]
    async fn test_alerts_filters_confirmations() {
        let log = NoticeLog::new();
        log.notify(Notice::confirmation("ok")).await;
        log.notify(Notice::alert("bad")).await;

        let alerts = log.alerts().await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message, "bad");
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        assert_eq!(NoticeLog::with_capacity(0).capacity(), 1);
    }
}
