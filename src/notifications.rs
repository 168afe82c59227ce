//! Short-lived status messages shared by every view.
//!
//! One `Notifications` value is created when the application starts and is
//! handed to views by `&mut`; ids are never reused or reset.

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub text: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct Notifications {
    next_id: u64,
    ttl: Duration,
    entries: HashMap<u64, Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ttl: NOTIFICATION_TTL,
            entries: HashMap::new(),
        }
    }

    /// Adds a notification that removes itself once the TTL has elapsed.
    /// Identical texts are kept as separate entries.
    pub fn dispatch(&mut self, text: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let notification = Notification {
            id,
            text: text.into(),
            expires_at: now + self.ttl,
        };
        crate::logger::debug(&format!(
            "Notification {} dispatched: {}",
            id, notification.text
        ));
        self.entries.insert(id, notification);
        id
    }

    /// Drops every notification whose timer has run out.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, n| now < n.expires_at);
        before - self.entries.len()
    }

    /// Live notifications, newest first.
    pub fn visible(&self) -> Vec<&Notification> {
        let mut visible: Vec<&Notification> = self.entries.values().collect();
        visible.sort_by(|a, b| b.id.cmp(&a.id));
        visible
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|n| n.expires_at).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_assigns_increasing_ids() {
        let now = Instant::now();
        let mut notifications = Notifications::new();

        assert_eq!(notifications.dispatch("one", now), 1);
        assert_eq!(notifications.dispatch("two", now), 2);
        assert_eq!(notifications.len(), 2);
    }

    #[test]
    fn test_notification_expires_after_ttl() {
        let now = Instant::now();
        let mut notifications = Notifications::new();
        let id = notifications.dispatch("added: cat -> gato", now);

        assert!(notifications.get(id).is_some());
        assert_eq!(notifications.expire(now + Duration::from_millis(2999)), 0);
        assert!(notifications.get(id).is_some());

        assert_eq!(notifications.expire(now + NOTIFICATION_TTL), 1);
        assert!(notifications.get(id).is_none());
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_duplicates_have_independent_timers() {
        let start = Instant::now();
        let mut notifications = Notifications::new();
        let first = notifications.dispatch("nothing to practice", start);
        let second =
            notifications.dispatch("nothing to practice", start + Duration::from_millis(1000));

        assert_ne!(first, second);
        notifications.expire(start + NOTIFICATION_TTL);
        assert!(notifications.get(first).is_none());
        assert!(notifications.get(second).is_some());

        notifications.expire(start + Duration::from_millis(4000));
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_visible_is_newest_first() {
        let now = Instant::now();
        let mut notifications = Notifications::new();
        notifications.dispatch("a", now);
        notifications.dispatch("b", now);
        notifications.dispatch("c", now);

        let texts: Vec<&str> = notifications
            .visible()
            .iter()
            .map(|n| n.text.as_str())
            .collect();
        assert_eq!(texts, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_ids_are_not_reused_after_expiry() {
        let now = Instant::now();
        let mut notifications = Notifications::new();
        notifications.dispatch("a", now);
        notifications.expire(now + NOTIFICATION_TTL);

        assert_eq!(notifications.dispatch("b", now + NOTIFICATION_TTL), 2);
    }

    #[test]
    fn test_next_deadline_is_earliest_expiry() {
        let now = Instant::now();
        let mut notifications = Notifications::new();
        assert!(notifications.next_deadline().is_none());

        notifications.dispatch("a", now);
        notifications.dispatch("b", now + Duration::from_millis(500));
        assert_eq!(notifications.next_deadline(), Some(now + NOTIFICATION_TTL));
    }
}
