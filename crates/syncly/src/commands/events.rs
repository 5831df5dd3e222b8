//! Event command handlers: one-shot listing and live follow.

use tabled::Tabled;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use syncly_api::{Event, EventData, EventPoller, EventQuery, EventStreamHandle};

use crate::cli::{EventsArgs, EventsCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

// ── Formatting ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Details")]
    details: String,
}

fn event_row(e: &Event) -> EventRow {
    EventRow {
        id: e.id,
        time: e.time.format("%H:%M:%S").to_string(),
        kind: e.kind().to_owned(),
        details: summary(&e.data),
    }
}

/// One-line description of the payloads people usually watch for.
fn summary(data: &EventData) -> String {
    match data {
        EventData::StateChanged(s) => match &s.error {
            Some(err) => format!("{}: {} -> {} ({err})", s.folder, s.from, s.to),
            None => format!("{}: {} -> {}", s.folder, s.from, s.to),
        },
        EventData::FolderSummary(s) => format!(
            "{}: {}, need {}",
            s.folder,
            s.summary.state,
            util::format_bytes(s.summary.need_bytes)
        ),
        EventData::FolderCompletion(c) => format!(
            "{} on {}: {:.0}%",
            c.folder,
            util::short_id(&c.device),
            c.completion
        ),
        EventData::DeviceConnected(d) => format!(
            "{} ({}) at {}",
            util::short_id(&d.id),
            util::or_dash(&d.device_name),
            d.addr
        ),
        EventData::DeviceDisconnected(d) => format!("{}: {}", util::short_id(&d.id), d.error),
        EventData::ItemFinished(i) => match &i.error {
            Some(err) => format!("{}/{} {} failed: {err}", i.folder, i.item, i.action),
            None => format!("{}/{} {}", i.folder, i.item, i.action),
        },
        EventData::LocalIndexUpdated(u) => format!("{}: {} items", u.folder, u.items),
        EventData::Unknown { data, .. } => data.to_string(),
        _ => String::new(),
    }
}

/// Render one streamed event. Structured formats emit one document per event.
fn render_event(event: &Event, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Plain => {
            let row = event_row(event);
            Ok(format!("{:>6}  {}  {:<24} {}", row.id, row.time, row.kind, row.details)
                .trim_end()
                .to_owned())
        }
        OutputFormat::Json | OutputFormat::JsonCompact => output::render_json(event, true),
        OutputFormat::Yaml => Ok(format!("---\n{}", serde_yaml::to_string(event)?)),
    }
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: EventsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        EventsCommand::List {
            since,
            types,
            limit,
            disk,
        } => {
            let client = session.client()?;
            let query = EventQuery {
                since: Some(since),
                limit,
                // Return what is buffered rather than waiting for new events
                timeout: Some(1),
                events: util::parse_event_types(&types)?,
            };
            let events = if disk {
                client.get_events_disk(&query).await?
            } else {
                client.get_events(&query).await?
            };
            let out = output::render_list(global.output, &events, event_row, |e| e.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EventsCommand::Watch {
            since,
            types,
            limit,
        } => {
            let mut poll = session.config().poll.clone();
            if limit.is_some() {
                poll.limit = limit;
            }
            let poller = EventPoller::new(session.client()?, poll)
                .since(since)
                .with_filter(util::parse_event_types(&types)?);

            let handle = EventStreamHandle::spawn(poller, CancellationToken::new());
            follow(handle, global).await
        }
    }
}

/// Print events from `handle` until Ctrl-C, then report the final cursor.
pub async fn follow(handle: EventStreamHandle, global: &GlobalOpts) -> Result<(), CliError> {
    let mut rx = handle.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    output::notice("Watching events (Ctrl-C to stop)", global.quiet);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            msg = rx.recv() => match msg {
                Ok(event) => output::print_output(&render_event(&event, global.output)?, global.quiet),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "output fell behind the event stream"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    let cursor = handle.join().await;
    output::notice(&format!("Stopped after event {cursor}"), global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(kind: &str, data: serde_json::Value) -> Event {
        serde_json::from_value(json!({
            "id": 42,
            "globalID": 97,
            "time": "2024-05-01T10:11:12.5+02:00",
            "type": kind,
            "data": data,
        }))
        .unwrap()
    }

    #[test]
    fn state_change_summary() {
        let e = event(
            "StateChanged",
            json!({"folder": "photos", "from": "idle", "to": "scanning", "duration": 1.5}),
        );
        assert_eq!(summary(&e.data), "photos: idle -> scanning");
    }

    #[test]
    fn plain_line_has_id_time_and_kind() {
        let e = event("Starting", json!({"home": "/data"}));
        let line = render_event(&e, OutputFormat::Plain).unwrap();
        assert!(line.starts_with("    42  10:11:12  Starting"));
    }

    #[test]
    fn json_stream_is_one_line_per_event() {
        let e = event("Ping", json!({}));
        let line = render_event(&e, OutputFormat::Json).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains(r#""type":"Ping""#));
    }
}
