//! Free TCP port search, mainly for tests that start local servers.
//!
//! A search binds port `0` to let the operating system pick a free port, then probes
//! the following ports by binding each of them. The listener on the first port is
//! held until the probes are done.
//!
//! The number of attempts is read from the `PORTSEARCH_RETRY_LIMIT` environment
//! variable (default 8192, capped at the number of non-reserved ports).
//!
//! # Examples
//!
//! ```
//! use simple_rest_client::ports;
//!
//! let port = ports::find_available_port(&[]).unwrap();
//! assert!(port > 0);
//!
//! let range = ports::find_available_port_range(None, 2, &[port]).unwrap();
//! assert_eq!(range[1], range[0] + 1);
//! ```

use crate::error::{RestError, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener};

/// Environment variable overriding the retry limit.
pub const RETRY_LIMIT_ENV: &str = "PORTSEARCH_RETRY_LIMIT";

const DEFAULT_RETRY_LIMIT: usize = 8192;
const MAX_RETRY_LIMIT: usize = 65536 - 1024;

/// The effective retry limit.
pub fn retry_limit() -> usize {
    parse_retry_limit(std::env::var(RETRY_LIMIT_ENV).ok().as_deref())
}

fn parse_retry_limit(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_RETRY_LIMIT)
        .min(MAX_RETRY_LIMIT)
}

/// Find one free port on all interfaces, skipping `excludes`.
pub fn find_available_port(excludes: &[u16]) -> Result<u16> {
    let ports = find_available_port_range(None, 1, excludes)?;
    Ok(ports[0])
}

/// Find `count` consecutive free ports on `addr` (all interfaces when `None`),
/// none of them in `excludes`.
///
/// # Errors
///
/// [`RestError::NoAvailablePort`] when the retry limit is exhausted,
/// [`RestError::PortSearch`] when the initial bind fails.
pub fn find_available_port_range(addr: Option<IpAddr>, count: u16, excludes: &[u16]) -> Result<Vec<u16>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let retries = retry_limit();
    for _ in 0..retries {
        let listener = bind(addr, 0).map_err(|source| RestError::PortSearch { source })?;
        let port = listener
            .local_addr()
            .map_err(|source| RestError::PortSearch { source })?
            .port();

        if excludes.contains(&port) || !next_ports_available(addr, port, count, excludes) {
            tracing::trace!(port, count, "port range unavailable, retrying");
            continue;
        }

        tracing::debug!(port, count, "found available port range");
        return Ok((0..count).map(|offset| port + offset).collect());
    }

    Err(RestError::NoAvailablePort { retries })
}

/// Check if `port` can be bound on `addr` (all interfaces when `None`).
pub fn is_available(addr: Option<IpAddr>, port: u16) -> bool {
    bind(addr, port).is_ok()
}

fn next_ports_available(addr: Option<IpAddr>, port: u16, count: u16, excludes: &[u16]) -> bool {
    (1..count).all(|offset| match port.checked_add(offset) {
        Some(next) => !excludes.contains(&next) && is_available(addr, next),
        None => false,
    })
}

fn bind(addr: Option<IpAddr>, port: u16) -> std::io::Result<TcpListener> {
    let ip = addr.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    TcpListener::bind(SocketAddr::new(ip, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retry_limit() {
        assert_eq!(parse_retry_limit(None), 8192);
        assert_eq!(parse_retry_limit(Some("16")), 16);
        assert_eq!(parse_retry_limit(Some("many")), 8192);
        assert_eq!(parse_retry_limit(Some("1000000")), 64512);
    }

    #[test]
    fn test_find_available_port() {
        let port = find_available_port(&[]).unwrap();
        assert!(port > 0);
        assert!(is_available(None, port));
    }

    #[test]
    fn test_excluded_port_is_skipped() {
        let first = find_available_port(&[]).unwrap();
        for _ in 0..10 {
            assert_ne!(find_available_port(&[first]).unwrap(), first);
        }
    }

    #[test]
    fn test_find_range_is_consecutive() {
        let localhost = Some(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let range = find_available_port_range(localhost, 3, &[]).unwrap();
        assert_eq!(range.len(), 3);
        assert_eq!(range[1], range[0] + 1);
        assert_eq!(range[2], range[0] + 2);
    }

    #[test]
    fn test_empty_range() {
        assert!(find_available_port_range(None, 0, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_bound_port_is_not_available() {
        let listener = bind(Some(IpAddr::V4(Ipv4Addr::LOCALHOST)), 0).unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(!is_available(Some(IpAddr::V4(Ipv4Addr::LOCALHOST)), port));
    }
}
