use chrono::{DateTime, FixedOffset};
use lettre::{address::Envelope, message::Mailbox, Address};
use snafu::ResultExt;

use crate::common::{MailSnafu, Result};

const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// A ready to send message: the SMTP envelope plus the raw RFC 5322 text.
#[derive(Debug)]
pub struct Composed {
    pub envelope: Envelope,
    pub formatted: String,
}

fn mailbox(name: &str, address: &str) -> Result<Mailbox> {
    let email: Address = address.parse().boxed_local().context(MailSnafu {
        message: format!("Invalid mail address {address:?}"),
    })?;
    let name = match name.trim() {
        "" => None,
        name => Some(name.to_string()),
    };
    Ok(Mailbox::new(name, email))
}

// Header folding is not worth it for one-line status messages, so line
// breaks are flattened instead.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Builds a message whose subject and body are both `message`, carrying only
/// From, To, Subject and Date headers.
pub fn compose(config: &crate::Config, message: &str, date: DateTime<FixedOffset>) -> Result<Composed> {
    let from = mailbox(&config.from_name, &config.from_address)?;
    let to = mailbox(&config.to_name, &config.to_address)?;

    let envelope = Envelope::new(Some(from.email.clone()), vec![to.email.clone()])
        .boxed_local()
        .context(MailSnafu {
            message: "Failed to build envelope",
        })?;

    let formatted = format!(
        "From: {from}\r\nTo: {to}\r\nSubject: {}\r\nDate: {}\r\n\r\n{message}",
        single_line(message),
        date.format(DATE_FORMAT),
    );

    Ok(Composed {
        envelope,
        formatted,
    })
}
