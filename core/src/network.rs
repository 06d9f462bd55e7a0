//! Socket boundaries used by the prober.
//!
//! [`transport`] declares what a probe needs from the network; [`tcp`] and [`udp`]
//! implement it on tokio sockets. Tests substitute their own implementations.

pub mod tcp;
pub mod transport;
pub mod udp;
