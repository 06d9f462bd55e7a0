//! Tests that exercise real processes and loopback sockets.

#[cfg(test)]
mod discovery;
#[cfg(test)]
mod probe;
#[cfg(test)]
mod scan;
#[cfg(test)]
mod util;
