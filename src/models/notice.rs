use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(2);

/// How long a success notice stays on screen.
pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A transient user-visible message.
///
/// Notices never change state; they describe what just happened (a
/// rejected selection, a failed catalog load). `dismiss_after_ms` tells the
/// surface how long to keep it visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub dismiss_after_ms: u64,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text, TOAST_DURATION)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text, SUCCESS_DURATION)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text, TOAST_DURATION)
    }

    pub fn new(kind: NoticeKind, text: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            kind,
            text: text.into(),
            dismiss_after_ms: dismiss_after.as_millis() as u64,
        }
    }

    pub fn with_duration(mut self, dismiss_after: Duration) -> Self {
        self.dismiss_after_ms = dismiss_after.as_millis() as u64;
        self
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        assert_eq!(Notice::info("x").dismiss_after(), Duration::from_secs(2));
        assert_eq!(Notice::error("x").dismiss_after(), Duration::from_secs(2));
        assert_eq!(Notice::success("x").dismiss_after(), Duration::from_secs(3));
    }

    #[test]
    fn test_with_duration_overrides() {
        let notice = Notice::info("x").with_duration(Duration::from_millis(500));
        assert_eq!(notice.dismiss_after_ms, 500);
    }
}
