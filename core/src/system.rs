//! The operating system's address-cache dump tool, seen from the outside.

use async_trait::async_trait;
use netsweep_common::error::ExternalToolError;
use tokio::process::Command;

const ARP_PROGRAM: &str = "arp";
const ARP_ARGS: &[&str] = &["-a"];

/// Produces the raw text of the address-resolution cache.
#[async_trait]
pub trait AddressCacheSource: Send + Sync {
    async fn dump(&self) -> Result<String, ExternalToolError>;
}

/// Runs an external command and returns its standard output.
///
/// Defaults to `arp -a`.
#[derive(Debug, Clone)]
pub struct ArpCommand {
    program: String,
    args: Vec<String>,
}

impl Default for ArpCommand {
    fn default() -> Self {
        Self::new(ARP_PROGRAM, ARP_ARGS.iter().copied())
    }
}

impl ArpCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AddressCacheSource for ArpCommand {
    async fn dump(&self) -> Result<String, ExternalToolError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ExternalToolError::Spawn {
                tool: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExternalToolError::Status {
                tool: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
