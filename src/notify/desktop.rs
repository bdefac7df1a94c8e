use notify_rust::Notification;

use super::Alerter;

/// Raises a desktop notification next to the in-terminal modal.
#[derive(Debug, Default)]
pub struct DesktopAlerter;

impl Alerter for DesktopAlerter {
    fn alert(&mut self, message: &str) {
        let result = Notification::new()
            .summary("tomatick")
            .body(message)
            .timeout(0) // No auto-dismiss
            .show();
        if let Err(e) = result {
            tracing::warn!("desktop notification failed: {e}");
        }
    }
}
