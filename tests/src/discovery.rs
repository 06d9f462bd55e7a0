#![cfg(test)]
use netsweep_common::diagnostics::CollectingDiagnostics;
use netsweep_common::error::ExternalToolError;
use netsweep_common::models::EntryType;
use netsweep_core::discovery;
use netsweep_core::system::{AddressCacheSource, ArpCommand};

#[tokio::test]
async fn missing_tool_is_a_spawn_error() {
    let command = ArpCommand::new("netsweep-no-such-tool", std::iter::empty::<&str>());

    let result = command.dump().await;

    assert!(
        matches!(&result, Err(ExternalToolError::Spawn { tool, .. }) if tool == "netsweep-no-such-tool"),
        "unexpected result: {result:?}"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn failing_tool_is_a_status_error_with_stderr() {
    let command = ArpCommand::new("sh", ["-c", "echo 'no cache for you' >&2; exit 3"]);

    let result = command.dump().await;

    match result {
        Err(ExternalToolError::Status { tool, stderr, .. }) => {
            assert_eq!(tool, "sh");
            assert_eq!(stderr, "no cache for you");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn tool_output_is_parsed_end_to_end() {
    let table = "
Interface: 192.168.1.5 --- 0x4
  Internet Address      Physical Address      Type
  192.168.1.1           aa-bb-cc-dd-ee-ff     dynamic
  192.168.1.255         ff-ff-ff-ff-ff-ff     static
  garbage
";
    let command = ArpCommand::new("printf", ["%s", table]);
    let diagnostics = CollectingDiagnostics::new();

    let entries = discovery::discover_hosts(&command, &diagnostics).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].interface_label, "Interface: 192.168.1.5 --- 0x4");
    assert_eq!(entries[0].address, "192.168.1.1");
    assert_eq!(entries[1].entry_type, EntryType::Static);
    assert_eq!(diagnostics.parse_errors().len(), 1);
}
