#![cfg(test)]
use netsweep_common::models::{PortState, Protocol};
use netsweep_core::prober::{PortProber, SocketProber};
use tokio::net::UdpSocket;

use crate::util::{self, WAIT};

#[tokio::test]
async fn tcp_listener_is_open() {
    let (_listener, port) = util::tcp_listener().await;

    let outcome = SocketProber::new().probe("127.0.0.1", port, Protocol::Tcp, WAIT).await;

    assert_eq!(outcome.state, PortState::Open);
    assert_eq!(outcome.cause, None);
}

#[tokio::test]
async fn tcp_without_listener_is_closed() {
    let port = util::free_tcp_port().await;

    let outcome = SocketProber::new().probe("127.0.0.1", port, Protocol::Tcp, WAIT).await;

    assert_eq!(outcome.state, PortState::Closed);
}

#[tokio::test]
async fn udp_echo_is_open() {
    let port = util::udp_echo().await;

    let outcome = SocketProber::new().probe("127.0.0.1", port, Protocol::Udp, WAIT).await;

    assert_eq!(outcome.state, PortState::Open);
}

#[tokio::test]
async fn silent_udp_service_is_filtered() {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();

    let outcome = SocketProber::new().probe("127.0.0.1", port, Protocol::Udp, WAIT).await;

    assert_eq!(outcome.state, PortState::Filtered);
    drop(socket);
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn udp_port_unreachable_is_closed() {
    let port = util::free_udp_port().await;

    let outcome = SocketProber::new().probe("127.0.0.1", port, Protocol::Udp, WAIT).await;

    assert_eq!(outcome.state, PortState::Closed);
}
