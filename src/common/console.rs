use std::io::Write;

/// Console output is informational only, a broken stdout is not an error.
pub fn say(out: &mut dyn Write, text: &str) {
    if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        tracing::debug!(error = %err, "Failed to write to console");
    }
}
