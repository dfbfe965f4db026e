//! Transient notifications (toasts)

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warn,
    Error,
}

impl ToastLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ToastLevel::Success => "ok",
            ToastLevel::Info => "info",
            ToastLevel::Warn => "warn",
            ToastLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub since: Instant,
}

/// Holds live toasts and drops them once their TTL has passed
#[derive(Debug, Clone)]
pub struct Notifier {
    toasts: VecDeque<Toast>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, level: ToastLevel) {
        self.push_at(text, level, Instant::now());
    }

    pub fn push_at(&mut self, text: impl Into<String>, level: ToastLevel, now: Instant) {
        self.toasts.push_back(Toast {
            text: text.into(),
            level,
            since: now,
        });
    }

    /// Newest live toast
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn expire_at(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.since) < ttl);
    }

    pub fn on_tick(&mut self) {
        self.expire_at(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_newest() {
        let mut notifier = Notifier::default();
        notifier.push("Login successful!", ToastLevel::Success);
        notifier.push("Failed to load products", ToastLevel::Error);
        let latest = notifier.latest().unwrap();
        assert_eq!(latest.text, "Failed to load products");
        assert_eq!(latest.level, ToastLevel::Error);
    }

    #[test]
    fn test_toasts_expire_after_ttl() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(5));
        notifier.push_at("old", ToastLevel::Info, start);
        notifier.push_at("new", ToastLevel::Info, start + Duration::from_secs(3));

        notifier.expire_at(start + Duration::from_secs(4));
        assert_eq!(notifier.len(), 2);

        notifier.expire_at(start + Duration::from_secs(5));
        assert_eq!(notifier.len(), 1);
        assert_eq!(notifier.latest().unwrap().text, "new");

        notifier.expire_at(start + Duration::from_secs(9));
        assert!(notifier.is_empty());
    }
}
