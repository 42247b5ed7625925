use std::time::Duration;

use chrono::Local;
use lettre::{
    transport::smtp::authentication::{Credentials, Mechanism},
    SmtpTransport, Transport,
};
use snafu::ResultExt;

use crate::common::{MailSnafu, Notifier, Result};

use super::compose;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends over an implicit TLS connection with PLAIN auth. Each send opens
/// its own connection and closes it afterwards; nothing is retried.
pub struct SmtpNotifier {
    config: crate::Config,
    host: String,
    port: u16,
}

impl SmtpNotifier {
    fn transport(&self) -> Result<SmtpTransport> {
        Ok(SmtpTransport::relay(&self.host)
            .boxed_local()
            .context(MailSnafu {
                message: format!("Failed to set up TLS for {}", self.host),
            })?
            .port(self.port)
            .credentials(Credentials::new(
                self.config.auth_user.clone(),
                self.config.auth_password.clone(),
            ))
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }
}

impl Notifier for SmtpNotifier {
    fn send(&self, message: &str) -> Result<()> {
        let composed = compose(&self.config, message, Local::now().fixed_offset())?;

        tracing::debug!(
            host = self.host,
            port = self.port,
            to = self.config.to_address,
            "Sending notification"
        );

        let response = self
            .transport()?
            .send_raw(&composed.envelope, composed.formatted.as_bytes())
            .boxed_local()
            .context(MailSnafu {
                message: format!("Failed to send mail via {}:{}", self.host, self.port),
            })?;

        tracing::debug!(code = %response.code(), "Mail accepted");
        Ok(())
    }
}

impl From<&crate::Config> for SmtpNotifier {
    fn from(value: &crate::Config) -> Self {
        let (host, port) = value.smtp_endpoint();
        Self {
            config: value.clone(),
            host,
            port,
        }
    }
}
