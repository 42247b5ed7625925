use std::time::Duration;

pub const ESCAPE_KEY_NAME: &str = "Escape";

/// One camera entry from the Agent object list. Display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Camera {
    pub name: String,
    pub url: String,
    pub login: String,
    pub password: String,
}

/// A single reachability check against the supervised service.
pub trait Probe {
    fn is_reachable(&self) -> bool;
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

pub trait Notifier {
    fn send(&self, message: &str) -> super::Result<()>;

    /// Best-effort delivery. Failures are logged and reported as `false`.
    fn notify(&self, message: &str) -> bool {
        match self.send(message) {
            Ok(()) => {
                tracing::info!(message = message, "Notification sent");
                true
            }
            Err(err) => {
                tracing::error!(message = message, error = %err, "Notification failed");
                false
            }
        }
    }
}

/// Platform capability to present a URL full screen and get rid of the
/// browser's first-run dialog.
pub trait Kiosk {
    fn open(&mut self, url: &url::Url) -> super::Result<()>;
    fn dismiss_dialog(&mut self) -> super::Result<()>;
}
