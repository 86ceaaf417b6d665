use std::fmt;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        };
        f.write_str(label)
    }
}

/// Short-lived message shown to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    /// Remaining ticks before the notification disappears
    pub ttl: u32,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind, ttl: u32) -> Self {
        Self {
            message: message.into(),
            kind,
            ttl,
        }
    }
}

/// Single notification slot with a tick countdown
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    /// Replace whatever is showing
    pub fn set(&mut self, notification: Notification) {
        self.current = Some(notification);
    }

    pub fn get(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Advance one tick; the notification is dropped once its ttl runs out
    pub fn tick(&mut self) {
        if let Some(notification) = &mut self.current {
            notification.ttl = notification.ttl.saturating_sub(1);
            if notification.ttl == 0 {
                self.current = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl_ticks() {
        let mut slot = NotificationSlot::default();
        slot.set(Notification::new("hello", NotificationKind::Info, 3));

        for _ in 0..2 {
            slot.tick();
            let live = slot.get().unwrap();
            assert_eq!(live.message, "hello");
            assert_eq!(live.kind, NotificationKind::Info);
        }

        slot.tick();
        assert!(slot.get().is_none());
    }

    #[test]
    fn newer_notification_overwrites() {
        let mut slot = NotificationSlot::default();
        slot.set(Notification::new("first", NotificationKind::Info, 10));
        slot.tick();
        slot.set(Notification::new("second", NotificationKind::Error, 10));

        let live = slot.get().unwrap();
        assert_eq!(live.message, "second");
        assert_eq!(live.ttl, 10);
    }

    #[test]
    fn zero_ttl_clears_on_first_tick() {
        let mut slot = NotificationSlot::default();
        slot.set(Notification::new("flash", NotificationKind::Success, 0));
        assert!(slot.get().is_some());
        slot.tick();
        assert!(slot.get().is_none());
    }
}
