use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::net::lookup_host;

/// Turns a host name or address literal into a socket address.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<SocketAddr>;
}

/// Opens a TCP connection and releases it straight away.
#[async_trait]
pub trait TcpConnector: Send + Sync {
    async fn connect(&self, target: SocketAddr) -> io::Result<()>;
}

/// Sends one datagram and waits for the first datagram back.
#[async_trait]
pub trait DatagramExchange: Send + Sync {
    /// Returns the size of the reply.
    async fn exchange(&self, target: SocketAddr, payload: &[u8]) -> io::Result<usize>;
}

/// The operating system's resolver; takes the first address returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

#[async_trait]
impl NameResolver for SystemResolver {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<SocketAddr> {
        lookup_host((host, port)).await?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{host} did not resolve to any address"),
            )
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn address_literals_resolve_without_lookup() {
        let addr = SystemResolver.resolve("127.0.0.1", 8080).await.unwrap();
        assert_eq!(addr, SocketAddr::from(([127, 0, 0, 1], 8080)));

        let addr = SystemResolver.resolve("::1", 53).await.unwrap();
        assert!(addr.is_ipv6());
    }
}
