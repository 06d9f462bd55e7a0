#![cfg(test)]
use std::time::Duration;

use tokio::net::{TcpListener, UdpSocket};

pub const WAIT: Duration = Duration::from_millis(500);

/// A TCP listener on an ephemeral loopback port, kept open for the caller.
pub async fn tcp_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// A loopback port that was just released, so nothing is listening on it.
pub async fn free_tcp_port() -> u16 {
    let (listener, port) = tcp_listener().await;
    drop(listener);
    port
}

pub async fn free_udp_port() -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.local_addr().unwrap().port()
}

/// A UDP socket that echoes every datagram back until the runtime shuts down.
pub async fn udp_echo() -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut buf = [0u8; 512];
        while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
            let _ = socket.send_to(&buf[..len], peer).await;
        }
    });
    port
}
