use anyhow::Result;

/// Posts a desktop notification when a countdown reaches zero
pub struct NotificationService {
    enabled: bool,
}

impl NotificationService {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if notifications are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable notifications
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Announce that the countdown for `title` has finished
    pub fn show_expired(&self, title: &str, body: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        self.post(title, body)
    }

    #[cfg(feature = "notifications")]
    fn post(&self, title: &str, body: &str) -> Result<()> {
        use notify_rust::{Notification, Timeout};

        Notification::new()
            .summary(title)
            .body(body)
            .timeout(Timeout::Milliseconds(10000))
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(())
    }

    #[cfg(not(feature = "notifications"))]
    fn post(&self, title: &str, _body: &str) -> Result<()> {
        log::info!("Notifications disabled at build time; skipping '{}'", title);
        Ok(())
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new(true)
    }
}
