use std::ffi::OsStr;
use std::process::Command;

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use snafu::ResultExt;

use crate::common::{Kiosk, KeyboardSnafu, LaunchSnafu, Result, ESCAPE_KEY_NAME};

/// Runs a browser binary in kiosk mode and talks to the desktop through a
/// virtual keyboard.
pub struct BrowserKiosk {
    browser: String,
    flags: Vec<String>,
}

impl BrowserKiosk {
    pub fn new(browser: impl Into<String>, flags: Vec<String>) -> Self {
        Self {
            browser: browser.into(),
            flags,
        }
    }

    #[cfg(windows)]
    pub(super) fn command(&self, url: &url::Url) -> Command {
        // Going through `start` detaches the browser from our console.
        let mut command = Command::new("cmd");
        command
            .args(["/C", "start", "", self.browser.as_str()])
            .args(&self.flags)
            .arg(url.as_str());
        command
    }

    #[cfg(not(windows))]
    pub(super) fn command(&self, url: &url::Url) -> Command {
        let mut command = Command::new(&self.browser);
        command.args(&self.flags).arg(url.as_str());
        command
    }
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Kiosk for BrowserKiosk {
    fn open(&mut self, url: &url::Url) -> Result<()> {
        let mut command = self.command(url);
        let description = describe(&command);

        // Fire and forget, the child is never waited on.
        let child = command.spawn().context(LaunchSnafu {
            command: description.clone(),
        })?;

        tracing::info!(command = description, pid = child.id(), "Browser started");
        Ok(())
    }

    fn dismiss_dialog(&mut self) -> Result<()> {
        let mut enigo = Enigo::new(&Settings::default())
            .boxed_local()
            .context(KeyboardSnafu {
                message: "Failed to open virtual keyboard",
            })?;

        enigo
            .key(Key::Escape, Direction::Click)
            .boxed_local()
            .context(KeyboardSnafu {
                message: format!("Failed to press {ESCAPE_KEY_NAME}"),
            })?;

        tracing::info!(key = ESCAPE_KEY_NAME, "Key sent");
        Ok(())
    }
}

impl From<&crate::Config> for BrowserKiosk {
    fn from(value: &crate::Config) -> Self {
        Self::new(value.browser.clone(), value.browser_flags())
    }
}
