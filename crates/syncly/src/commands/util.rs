//! Shared helpers for command handlers.

use std::str::FromStr;
use std::time::Duration;

use syncly_api::EventType;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Parse `--types` values into event kinds. Names are case-sensitive wire names.
pub fn parse_event_types(raw: &[String]) -> Result<Vec<EventType>, CliError> {
    raw.iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            EventType::from_str(s.trim()).map_err(|_| CliError::Validation {
                field: "types".into(),
                reason: format!("unknown event type '{s}'"),
            })
        })
        .collect()
}

/// `3h 12m 5s` style duration.
pub fn format_uptime(secs: u64) -> String {
    humantime::format_duration(Duration::from_secs(secs)).to_string()
}

/// Byte count with binary units; negative counts (never sent by the daemon) render as 0.
pub fn format_bytes(bytes: i64) -> String {
    bytesize::ByteSize::b(u64::try_from(bytes).unwrap_or(0)).to_string()
}

pub fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

/// First seven characters of a device ID, as the daemon's own UI shows it.
pub fn short_id(id: &str) -> &str {
    id.get(..7).unwrap_or(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn event_types_parse_wire_names() {
        let kinds =
            parse_event_types(&["StateChanged".into(), " FolderSummary".into(), String::new()])
                .unwrap();
        assert_eq!(kinds, vec![EventType::StateChanged, EventType::FolderSummary]);
    }

    #[test]
    fn unknown_event_type_is_a_usage_error() {
        let err = parse_event_types(&["Bogus".into()]).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn formatting_helpers() {
        assert_eq!(format_uptime(3725), "1h 2m 5s");
        assert_eq!(format_bytes(-1), "0 B");
        assert_eq!(or_dash(""), "-");
        assert_eq!(short_id("MFZWI3D-BONSGYC"), "MFZWI3D");
        assert_eq!(short_id("abc"), "abc");
    }
}
