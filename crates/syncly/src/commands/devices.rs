//! Device command handlers.

use serde::Serialize;
use tabled::Tabled;

use syncly_api::Client;
use syncly_api::models::{ConnectionInfo, Device, DeviceStats};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

/// A configured device joined with its live connection and statistics.
#[derive(Serialize)]
struct DeviceView {
    #[serde(flatten)]
    device: Device,
    connection: Option<ConnectionInfo>,
    stats: Option<DeviceStats>,
}

impl DeviceView {
    fn state(&self) -> &'static str {
        match &self.connection {
            _ if self.device.paused => "paused",
            Some(c) if c.connected => "connected",
            _ => "disconnected",
        }
    }
}

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

fn device_row(v: &DeviceView, color: bool) -> DeviceRow {
    let conn = v.connection.as_ref();
    DeviceRow {
        id: util::short_id(&v.device.device_id).to_owned(),
        name: util::or_dash(&v.device.name).to_owned(),
        state: output::paint_state(v.state(), color),
        address: util::or_dash(conn.map_or("", |c| c.address.as_str())).to_owned(),
        client: util::or_dash(conn.map_or("", |c| c.client_version.as_str())).to_owned(),
        last_seen: util::or_dash(v.stats.as_ref().map_or("", |s| s.last_seen.as_str())).to_owned(),
    }
}

fn detail(d: &Device) -> String {
    let mut lines = vec![
        format!("ID:          {}", d.device_id),
        format!("Name:        {}", util::or_dash(&d.name)),
        format!("Addresses:   {}", d.addresses.join(", ")),
        format!("Compression: {}", d.compression),
        format!("Introducer:  {}", d.introducer),
        format!("Paused:      {}", d.paused),
    ];
    if d.untrusted {
        lines.push("Untrusted:   true".into());
    }
    if !d.introduced_by.is_empty() {
        lines.push(format!("Introduced by: {}", d.introduced_by));
    }
    lines.join("\n")
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(client: &Client, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let (devices, connections, mut stats) = tokio::try_join!(
                client.get_config_devices(),
                client.get_system_connections(),
                client.get_stats_device(),
            )?;
            let mut connections = connections.connections;
            let views: Vec<DeviceView> = devices
                .into_iter()
                .map(|device| DeviceView {
                    connection: connections.remove(&device.device_id),
                    stats: stats.remove(&device.device_id),
                    device,
                })
                .collect();

            let color = output::should_color(global.color);
            let out = output::render_list(
                global.output,
                &views,
                |v| device_row(v, color),
                |v| v.device.device_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { id } => {
            let device = client.get_config_device(&id).await.map_err(|e| {
                if e.is_not_found() {
                    CliError::NotFound {
                        resource_type: "device".into(),
                        identifier: id.clone(),
                        list_command: "devices list".into(),
                    }
                } else {
                    e.into()
                }
            })?;
            let out = output::render_single(global.output, &device, detail, |d| {
                d.device_id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Pause { id } => {
            client.post_system_pause(id.as_deref()).await?;
            let target = id.as_deref().map_or_else(|| "All devices".to_owned(), |d| format!("Device '{d}'"));
            output::notice(&format!("{target} paused"), global.quiet);
            Ok(())
        }

        DevicesCommand::Resume { id } => {
            client.post_system_resume(id.as_deref()).await?;
            let target = id.as_deref().map_or_else(|| "All devices".to_owned(), |d| format!("Device '{d}'"));
            output::notice(&format!("{target} resumed"), global.quiet);
            Ok(())
        }
    }
}
