use std::io::Write;
use std::time::Duration;

use crate::common::{say, Probe, Sleeper};

use super::Phrases;

const GO_PROMPT: &str = "Are we in a 'go' situation already?  ";
const WAIT_PROMPT: &str = "Waiting for Agent startup ... ";

pub struct Poller<'a> {
    probe: &'a dyn Probe,
    sleeper: &'a dyn Sleeper,
    interval: Duration,
    phrases: Phrases,
}

impl<'a> Poller<'a> {
    pub fn new(probe: &'a dyn Probe, sleeper: &'a dyn Sleeper, interval: Duration) -> Self {
        Self {
            probe,
            sleeper,
            interval,
            phrases: Phrases::default(),
        }
    }

    pub fn with_phrases(mut self, phrases: Phrases) -> Self {
        self.phrases = phrases;
        self
    }

    /// Blocks until the probe succeeds, sleeping a constant interval after
    /// every failure. There is no attempt limit.
    ///
    /// Returns the number of failed attempts.
    pub fn wait_until_available(&mut self, out: &mut dyn Write) -> usize {
        say(out, GO_PROMPT);
        let mut failures = 0;
        loop {
            if self.probe.is_reachable() {
                say(out, "ok\n");
                tracing::info!(failures = failures, "Service is reachable");
                return failures;
            }
            failures += 1;
            say(out, &format!("{}\n{WAIT_PROMPT}", self.phrases.next_phrase()));
            tracing::debug!(
                failures = failures,
                interval = ?self.interval,
                "Service not reachable yet"
            );
            self.sleeper.sleep(self.interval);
        }
    }
}
