use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::common::{Probe, Sleeper};

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Checks that something accepts TCP connections on host:port.
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: PROBE_TIMEOUT,
        }
    }

    fn addresses(&self) -> Vec<SocketAddr> {
        match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs.collect(),
            Err(err) => {
                tracing::debug!(host = self.host, error = %err, "Failed to resolve probe target");
                Vec::new()
            }
        }
    }
}

impl Probe for TcpProbe {
    // Refused, timed out and unresolvable all mean "not yet".
    fn is_reachable(&self) -> bool {
        self.addresses().iter().any(|addr| {
            match TcpStream::connect_timeout(addr, self.timeout) {
                // Dropping the stream closes it straight away.
                Ok(_stream) => true,
                Err(err) => {
                    tracing::debug!(addr = %addr, error = %err, "Probe failed");
                    false
                }
            }
        })
    }
}

impl From<&crate::Config> for TcpProbe {
    fn from(value: &crate::Config) -> Self {
        Self::new(value.host.clone(), value.port)
    }
}

#[derive(Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
