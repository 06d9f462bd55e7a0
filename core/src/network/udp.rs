use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use async_trait::async_trait;
use tokio::net::UdpSocket;

use super::transport::DatagramExchange;

const RECV_BUFFER_SIZE: usize = 2048;

/// Connected UDP socket on an ephemeral port.
///
/// Connecting lets the kernel hand an ICMP port-unreachable back to us as
/// `ConnectionRefused` (or `ConnectionReset` on Windows) instead of dropping it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioUdpExchange;

#[async_trait]
impl DatagramExchange for TokioUdpExchange {
    async fn exchange(&self, target: SocketAddr, payload: &[u8]) -> io::Result<usize> {
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).await?;
        socket.connect(target).await?;
        socket.send(payload).await?;

        let mut buf = [0u8; RECV_BUFFER_SIZE];
        socket.recv(&mut buf).await
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
