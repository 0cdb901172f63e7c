//! Hostname-to-address resolution as an injectable capability.
//!
//! Interface validation consults a resolver whenever an `ipAddress` value is
//! not a literal address. The lookup lives behind [`AddressResolver`] so the
//! validator stays deterministic under test: production wires in
//! [`DnsResolver`], tests wire in [`StaticResolver`].

use std::collections::HashMap;
use std::net::{IpAddr, ToSocketAddrs};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Default bound on a single hostname lookup.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a hostname lookup produced no usable address.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The lookup succeeded but returned no addresses.
    #[error("no addresses found for {host}")]
    NoAddresses { host: String },

    /// The lookup did not answer within the configured bound.
    #[error("lookup timed out after {}s", .timeout.as_secs())]
    TimedOut { timeout: Duration },

    /// The system resolver reported a failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Turns a hostname into an IP address.
pub trait AddressResolver: Send + Sync {
    /// Resolve `host` to its first address.
    fn resolve(&self, host: &str) -> Result<IpAddr, ResolveError>;
}

/// System resolver with a bounded wait.
///
/// The standard library lookup blocks with no deadline, so the call runs on
/// a worker thread and is abandoned once the timeout elapses.
#[derive(Debug, Clone)]
pub struct DnsResolver {
    timeout: Duration,
}

impl DnsResolver {
    pub fn new(timeout: Duration) -> Self {
        DnsResolver { timeout }
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        DnsResolver::new(DEFAULT_RESOLVE_TIMEOUT)
    }
}

impl AddressResolver for DnsResolver {
    fn resolve(&self, host: &str) -> Result<IpAddr, ResolveError> {
        let (tx, rx) = mpsc::channel();
        let lookup_host = host.to_string();
        thread::spawn(move || {
            let result = (lookup_host.as_str(), 0u16)
                .to_socket_addrs()
                .map(|mut addrs| addrs.next().map(|addr| addr.ip()));
            // The receiver is gone if the lookup outlived the timeout.
            let _ = tx.send(result);
        });
        match rx.recv_timeout(self.timeout) {
            Ok(Ok(Some(addr))) => Ok(addr),
            Ok(Ok(None)) => Err(ResolveError::NoAddresses {
                host: host.to_string(),
            }),
            Ok(Err(err)) => Err(ResolveError::Io(err)),
            Err(_) => Err(ResolveError::TimedOut {
                timeout: self.timeout,
            }),
        }
    }
}

/// Fixed-table resolver for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<String, IpAddr>,
}

impl StaticResolver {
    pub fn new() -> Self {
        StaticResolver::default()
    }

    /// Map `host` to `addr`, consuming and returning self for chaining.
    pub fn with(mut self, host: impl Into<String>, addr: IpAddr) -> Self {
        self.entries.insert(host.into(), addr);
        self
    }
}

impl AddressResolver for StaticResolver {
    fn resolve(&self, host: &str) -> Result<IpAddr, ResolveError> {
        self.entries
            .get(host)
            .copied()
            .ok_or_else(|| ResolveError::NoAddresses {
                host: host.to_string(),
            })
    }
}
