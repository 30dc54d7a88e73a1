//! Success/error notifications.

use std::time::{Duration, Instant};

/// How long a toast stays visible unless dismissed earlier.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

/// Queue of visible toasts, oldest first. Ids are unique per queue.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message.into(), ToastKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message.into(), ToastKind::Error)
    }

    fn push(&mut self, message: String, kind: ToastKind) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            message,
            kind,
            created_at: Instant::now(),
        });
        self.next_id
    }

    /// Remove the toast with `id`; returns whether it was present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Drop every toast older than `ttl` at `now`.
    pub fn expire(&mut self, now: Instant, ttl: Duration) {
        self.items
            .retain(|t| now.saturating_duration_since(t.created_at) < ttl);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_dismissable() {
        let mut toasts = Toasts::new();
        let a = toasts.success("saved");
        let b = toasts.error("failed");
        assert_ne!(a, b);

        assert!(toasts.dismiss(a));
        assert!(!toasts.dismiss(a));
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.latest().unwrap().kind, ToastKind::Error);
    }

    #[test]
    fn expire_drops_only_old_toasts() {
        let mut toasts = Toasts::new();
        toasts.success("old");
        toasts.error("new");
        let later = toasts.items[0].created_at + Duration::from_secs(6);
        toasts.items[1].created_at = later;

        toasts.expire(later, DEFAULT_TOAST_TTL);

        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].message, "new");
    }
}
