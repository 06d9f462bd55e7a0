//! # Port Prober
//!
//! One attempt, one socket, one bounded wait per call. The outcome is classified by
//! inspecting the specific failure the transport reported:
//!
//! | transport result                 | TCP        | UDP        |
//! |----------------------------------|------------|------------|
//! | connected / reply received       | `Open`     | `Open`     |
//! | refused (RST / port unreachable) | `Closed`   | `Closed`   |
//! | timeout, host/network unreachable| `Filtered` | `Filtered` |
//! | anything else                    | `Error`    | `Error`    |
//!
//! For UDP, `Filtered` also covers services that are open but stay silent, and
//! `Open` only means *something* answered. UDP reachability has no handshake, so
//! neither classification is authoritative.
//!
//! Name resolution runs first, under its own `timeout`. A lookup that fails or does
//! not finish in time is an `Error`, never `Filtered`: nothing was sent to the port.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use netsweep_common::error::ProbeError;
use netsweep_common::models::{PortState, ProbeOutcome, Protocol};
use tokio::time::{error::Elapsed, timeout};

use crate::network::tcp::TokioTcpConnector;
use crate::network::transport::{DatagramExchange, NameResolver, SystemResolver, TcpConnector};
use crate::network::udp::TokioUdpExchange;

/// Single zero byte, the smallest datagram most stacks will deliver.
const UDP_PROBE_PAYLOAD: &[u8] = &[0];

/// Probes a single (host, port, protocol) triple.
///
/// Implementations never fail: every condition is folded into the returned
/// [`ProbeOutcome`].
#[async_trait]
pub trait PortProber: Send + Sync {
    async fn probe(
        &self,
        host: &str,
        port: u16,
        protocol: Protocol,
        timeout: Duration,
    ) -> ProbeOutcome;
}

/// Prober backed by real (or substituted) resolver and socket transports.
#[derive(Debug, Default, Clone)]
pub struct SocketProber<T = TokioTcpConnector, U = TokioUdpExchange, R = SystemResolver> {
    tcp: T,
    udp: U,
    resolver: R,
}

impl SocketProber {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, U> SocketProber<T, U>
where
    T: TcpConnector,
    U: DatagramExchange,
{
    pub fn with_transports(tcp: T, udp: U) -> Self {
        Self {
            tcp,
            udp,
            resolver: SystemResolver,
        }
    }
}

impl<T, U, R> SocketProber<T, U, R> {
    pub fn with_resolver<R2: NameResolver>(self, resolver: R2) -> SocketProber<T, U, R2> {
        SocketProber {
            tcp: self.tcp,
            udp: self.udp,
            resolver,
        }
    }
}

impl<T, U, R> SocketProber<T, U, R>
where
    R: NameResolver,
{
    async fn resolve(
        &self,
        host: &str,
        port: u16,
        wait: Duration,
    ) -> Result<SocketAddr, ProbeError> {
        match timeout(wait, self.resolver.resolve(host, port)).await {
            Ok(Ok(target)) => Ok(target),
            Ok(Err(err)) => Err(err.into()),
            Err(_elapsed) => Err(ProbeError {
                kind: io::ErrorKind::TimedOut,
                message: format!("resolving {host} did not finish within {wait:?}"),
            }),
        }
    }
}

#[async_trait]
impl<T, U, R> PortProber for SocketProber<T, U, R>
where
    T: TcpConnector,
    U: DatagramExchange,
    R: NameResolver,
{
    async fn probe(
        &self,
        host: &str,
        port: u16,
        protocol: Protocol,
        wait: Duration,
    ) -> ProbeOutcome {
        let target = match self.resolve(host, port, wait).await {
            Ok(target) => target,
            Err(cause) => {
                return ProbeOutcome::new(host, port, protocol, PortState::Error).with_cause(cause);
            }
        };

        let (state, cause) = match protocol {
            Protocol::Tcp => classify_tcp(timeout(wait, self.tcp.connect(target)).await),
            Protocol::Udp => {
                classify_udp(timeout(wait, self.udp.exchange(target, UDP_PROBE_PAYLOAD)).await)
            }
        };

        let outcome = ProbeOutcome::new(host, port, protocol, state);
        match cause {
            Some(cause) => outcome.with_cause(cause),
            None => outcome,
        }
    }
}

type Classified = (PortState, Option<ProbeError>);

fn classify_tcp(result: Result<io::Result<()>, Elapsed>) -> Classified {
    match result {
        Ok(Ok(())) => (PortState::Open, None),
        Ok(Err(err)) => match err.kind() {
            io::ErrorKind::ConnectionRefused => (PortState::Closed, None),
            kind if is_silent(kind) => (PortState::Filtered, Some(err.into())),
            _ => (PortState::Error, Some(err.into())),
        },
        Err(_elapsed) => (PortState::Filtered, None),
    }
}

fn classify_udp(result: Result<io::Result<usize>, Elapsed>) -> Classified {
    match result {
        Ok(Ok(_len)) => (PortState::Open, None),
        Ok(Err(err)) => match err.kind() {
            io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
                (PortState::Closed, None)
            }
            kind if is_silent(kind) => (PortState::Filtered, Some(err.into())),
            _ => (PortState::Error, Some(err.into())),
        },
        Err(_elapsed) => (PortState::Filtered, None),
    }
}

/// Failures that mean "nothing useful came back" rather than a local fault.
fn is_silent(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::TimedOut
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable
    )
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
    use std::future;

    const WAIT: Duration = Duration::from_millis(50);

    /// Network double whose behaviour is fixed per instance.
    #[derive(Clone, Copy)]
    enum Endpoint {
        Listening,
        Refusing,
        Silent,
        Unresolvable,
        SlowLookup,
        Forbidden,
        Unreachable,
    }

    impl Endpoint {
        async fn respond<R>(self, reply: R) -> io::Result<R> {
            match self {
                Endpoint::Listening => Ok(reply),
                Endpoint::Refusing => Err(io::ErrorKind::ConnectionRefused.into()),
                Endpoint::Silent => future::pending().await,
                Endpoint::Forbidden => Err(io::ErrorKind::PermissionDenied.into()),
                Endpoint::Unreachable => Err(io::ErrorKind::HostUnreachable.into()),
                Endpoint::Unresolvable | Endpoint::SlowLookup => {
                    panic!("transport used without a resolved address")
                }
            }
        }
    }

    #[async_trait]
    impl NameResolver for Endpoint {
        async fn resolve(&self, _host: &str, port: u16) -> io::Result<SocketAddr> {
            match self {
                Endpoint::Unresolvable => Err(io::Error::other("failed to lookup address")),
                Endpoint::SlowLookup => future::pending().await,
                _ => Ok(SocketAddr::from(([10, 0, 0, 1], port))),
            }
        }
    }

    #[async_trait]
    impl TcpConnector for Endpoint {
        async fn connect(&self, _target: SocketAddr) -> io::Result<()> {
            self.respond(()).await
        }
    }

    #[async_trait]
    impl DatagramExchange for Endpoint {
        async fn exchange(&self, _target: SocketAddr, payload: &[u8]) -> io::Result<usize> {
            self.respond(payload.len()).await
        }
    }

    async fn probe(endpoint: Endpoint, protocol: Protocol) -> ProbeOutcome {
        SocketProber::with_transports(endpoint, endpoint)
            .with_resolver(endpoint)
            .probe("10.0.0.1", 8080, protocol, WAIT)
            .await
    }

    #[tokio::test]
    async fn tcp_states_are_distinguishable() {
        assert_eq!(probe(Endpoint::Listening, Protocol::Tcp).await.state, PortState::Open);
        assert_eq!(probe(Endpoint::Refusing, Protocol::Tcp).await.state, PortState::Closed);
        assert_eq!(probe(Endpoint::Silent, Protocol::Tcp).await.state, PortState::Filtered);
    }

    #[tokio::test]
    async fn udp_states_are_distinguishable() {
        assert_eq!(probe(Endpoint::Listening, Protocol::Udp).await.state, PortState::Open);
        assert_eq!(probe(Endpoint::Refusing, Protocol::Udp).await.state, PortState::Closed);
        assert_eq!(probe(Endpoint::Silent, Protocol::Udp).await.state, PortState::Filtered);
    }

    #[tokio::test]
    async fn outcome_echoes_the_probed_triple() {
        let outcome = probe(Endpoint::Listening, Protocol::Udp).await;
        assert_eq!(outcome.host, "10.0.0.1");
        assert_eq!(outcome.port, 8080);
        assert_eq!(outcome.protocol, Protocol::Udp);
        assert_eq!(outcome.cause, None);
    }

    #[tokio::test]
    async fn silent_probe_waits_for_the_timeout() {
        let started = tokio::time::Instant::now();
        let outcome = probe(Endpoint::Silent, Protocol::Tcp).await;
        assert_eq!(outcome.state, PortState::Filtered);
        assert!(started.elapsed() >= WAIT);
        assert_eq!(outcome.cause, None);
    }

    #[tokio::test]
    async fn transport_failures_become_errors_with_a_cause() {
        let outcome = probe(Endpoint::Unresolvable, Protocol::Tcp).await;
        assert_eq!(outcome.state, PortState::Error);
        let cause = outcome.cause.expect("error outcomes carry a cause");
        assert_eq!(cause.kind, io::ErrorKind::Other);

        let outcome = probe(Endpoint::Forbidden, Protocol::Udp).await;
        assert_eq!(outcome.state, PortState::Error);
        assert_eq!(
            outcome.cause.map(|c| c.kind),
            Some(io::ErrorKind::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn stalled_name_lookup_is_an_error_not_filtered() {
        for protocol in [Protocol::Tcp, Protocol::Udp] {
            let outcome = probe(Endpoint::SlowLookup, protocol).await;
            assert_eq!(outcome.state, PortState::Error);
            assert_eq!(outcome.cause.map(|c| c.kind), Some(io::ErrorKind::TimedOut));
        }
    }

    #[tokio::test]
    async fn address_literals_go_through_the_system_resolver() {
        let outcome = SocketProber::with_transports(Endpoint::Refusing, Endpoint::Refusing)
            .probe("127.0.0.1", 9, Protocol::Tcp, WAIT)
            .await;
        assert_eq!(outcome.state, PortState::Closed);
    }

    #[tokio::test]
    async fn unreachable_routes_are_filtered_not_errors() {
        let outcome = probe(Endpoint::Unreachable, Protocol::Tcp).await;
        assert_eq!(outcome.state, PortState::Filtered);
        assert_eq!(
            outcome.cause.map(|c| c.kind),
            Some(io::ErrorKind::HostUnreachable)
        );
    }

    #[test]
    fn windows_style_udp_reset_counts_as_closed() {
        let reset: io::Result<usize> = Err(io::ErrorKind::ConnectionReset.into());
        assert_eq!(classify_udp(Ok(reset)).0, PortState::Closed);

        let reset: io::Result<()> = Err(io::ErrorKind::ConnectionReset.into());
        assert_eq!(classify_tcp(Ok(reset)).0, PortState::Error);
    }
}
