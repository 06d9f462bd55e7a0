use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::net::TcpStream;

use super::transport::TcpConnector;

/// Full three-way handshake through the operating system's connect call.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTcpConnector;

#[async_trait]
impl TcpConnector for TokioTcpConnector {
    async fn connect(&self, target: SocketAddr) -> io::Result<()> {
        let stream = TcpStream::connect(target).await?;
        drop(stream);
        Ok(())
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
