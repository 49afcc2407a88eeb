//! Server lifecycle management.

use crate::log;
use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use tiny_http::Server;

/// Maximum number of port binding attempts.
pub const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
///
/// Tries `base_port`, then each following port, up to [`MAX_PORT_RETRIES`]
/// attempts in total.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let Some(port) = base_port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => {
                crate::debug!("serve"; "cannot bind {}: {}", addr, e);
                last_error = Some((port, e));
            }
        }
    }

    match last_error {
        Some((port, e)) => Err(anyhow::anyhow!(
            "Failed to bind after {} attempts (ports {}-{}): {}",
            MAX_PORT_RETRIES,
            base_port,
            port,
            e
        )),
        None => Err(anyhow::anyhow!("no usable port from {}", base_port)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn test_bind_ephemeral() {
        let (_server, addr) = bind_with_retry(LOCALHOST, 0).unwrap();
        assert_eq!(addr.ip(), LOCALHOST);
    }

    #[test]
    fn test_retry_next_port() {
        // Occupy an OS-chosen port, then ask for it
        let (first, _) = bind_with_retry(LOCALHOST, 0).unwrap();
        let taken = first.server_addr().to_ip().unwrap().port();

        let (_second, addr) = bind_with_retry(LOCALHOST, taken).unwrap();
        assert_ne!(addr.port(), taken);
        assert!(addr.port() > taken);
        assert!(u32::from(addr.port()) < u32::from(taken) + u32::from(MAX_PORT_RETRIES));
    }
}
