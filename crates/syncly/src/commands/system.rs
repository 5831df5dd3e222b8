//! System command handlers: status, version, health, log, errors, lifecycle.

use tabled::Tabled;

use syncly_api::Client;
use syncly_api::models::{LogLine, SystemStatus, SystemUpgrade, SystemVersion};

use crate::cli::{ErrorsArgs, ErrorsCommand, GlobalOpts, LogArgs, UpgradeArgs, UpgradeCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Message")]
    message: String,
}

fn log_row(line: &LogLine) -> LogRow {
    LogRow {
        when: line.when.clone(),
        message: line.message.clone(),
    }
}

fn status_detail(s: &SystemStatus) -> String {
    let mut lines = vec![
        format!("Device ID:  {}", s.my_id),
        format!("Uptime:     {}", util::format_uptime(s.uptime)),
        format!("Started:    {}", util::or_dash(&s.start_time)),
        format!("CPU:        {:.1}%", s.cpu_percent),
        format!(
            "Memory:     {} allocated, {} from OS",
            util::format_bytes(s.alloc),
            util::format_bytes(s.sys)
        ),
        format!("Goroutines: {}", s.goroutines),
        format!(
            "Discovery:  {}",
            if s.discovery_enabled { "enabled" } else { "disabled" }
        ),
    ];
    for (addr, listener) in &s.connection_service_status {
        let state = listener.error.as_deref().unwrap_or("ok");
        lines.push(format!("Listener:   {addr} ({state})"));
    }
    lines.join("\n")
}

fn version_detail(v: &SystemVersion) -> String {
    [
        format!("Version: {}", v.version),
        format!("OS/Arch: {}/{}", v.os, v.arch),
        format!("Build:   {}", v.long_version),
    ]
    .join("\n")
}

fn upgrade_detail(u: &SystemUpgrade) -> String {
    let verdict = match (u.newer, u.major_newer) {
        (_, true) => "a new major release is available",
        (true, false) => "an update is available",
        (false, false) => "up to date",
    };
    [
        format!("Running: {}", u.running),
        format!("Latest:  {}", u.latest),
        format!("Status:  {verdict}"),
    ]
    .join("\n")
}

// ── Handlers ─────────────────────────────────────────────────────────

pub async fn status(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let status = client.get_system_status().await?;
    let out = output::render_single(global.output, &status, status_detail, |s| s.my_id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn version(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let version = client.get_system_version().await?;
    let out = output::render_single(global.output, &version, version_detail, |v| {
        v.version.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn health(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let health = client.get_health().await?;
    if !health.is_ok() {
        return Err(CliError::ApiError {
            message: format!("daemon reports status '{}'", health.status),
        });
    }
    let out = output::render_single(global.output, &health, |h| h.status.clone(), |h| {
        h.status.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn ping(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let ping = client.get_system_ping().await?;
    let out = output::render_single(global.output, &ping, |p| p.ping.clone(), |p| p.ping.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn restart(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm("Restart the daemon?", "restart", global.yes)? {
        return Ok(());
    }
    client.post_system_restart().await?;
    output::notice("Restart requested", global.quiet);
    Ok(())
}

pub async fn shutdown(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm(
        "Shut the daemon down? It will not come back on its own.",
        "shutdown",
        global.yes,
    )? {
        return Ok(());
    }
    client.post_system_shutdown().await?;
    output::notice("Shutdown requested", global.quiet);
    Ok(())
}

pub async fn upgrade(client: &Client, args: UpgradeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        UpgradeCommand::Check => {
            let upgrade = client.get_system_upgrade().await?;
            let out = output::render_single(global.output, &upgrade, upgrade_detail, |u| {
                u.latest.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

pub async fn errors(client: &Client, args: ErrorsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ErrorsCommand::List => {
            let errors = client.get_system_error().await?;
            let out = output::render_list(
                global.output,
                &errors.errors,
                log_row,
                |l| l.message.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ErrorsCommand::Clear => {
            client.post_system_error_clear().await?;
            output::notice("Errors cleared", global.quiet);
            Ok(())
        }
    }
}

pub async fn log(client: &Client, args: LogArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.text {
        let text = client.get_system_log_txt(args.since.as_deref()).await?;
        output::print_output(text.trim_end(), global.quiet);
        return Ok(());
    }

    let log = client.get_system_log(args.since.as_deref()).await?;
    let out = output::render_list(global.output, &log.messages, log_row, |l| {
        format!("{} {}", l.when, l.message)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
