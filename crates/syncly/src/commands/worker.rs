//! Run a local daemon as a child process.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use syncly_api::{Client, EventType};
use syncly_core::{ProcessWorker, SessionProvider};

use crate::cli::{GlobalOpts, WorkerArgs, WorkerCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::events;

const READY_ATTEMPTS: u32 = 60;
const READY_INTERVAL: Duration = Duration::from_millis(500);

pub async fn handle(args: WorkerArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let resolved = config::resolve(global)?;
    let env = syncly_config::worker_environment(&resolved.profile.worker);

    match args.command {
        WorkerCommand::Env => {
            let vars = env.vars();
            let out = output::render_single(global.output, &vars, env_lines, env_lines)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WorkerCommand::Run { events } => {
            let worker = syncly_config::process_worker(&resolved.profile.worker);
            let session: SessionProvider<ProcessWorker> =
                SessionProvider::new(worker, resolved.session);

            let client = session.start_worker(&env).await?;
            let result = run_until_interrupted(&session, &client, events, global).await;
            // Stop the child even when waiting for it failed
            session.shutdown().await?;
            result
        }
    }
}

async fn run_until_interrupted(
    session: &SessionProvider<ProcessWorker>,
    client: &Client,
    follow_events: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    wait_until_ready(client).await?;
    let status = client.get_system_status().await?;
    output::notice(
        &format!(
            "Daemon {} listening at {}",
            status.my_id,
            session.config().base_url
        ),
        global.quiet,
    );

    if follow_events {
        let handle = session.spawn_events(0, Vec::<EventType>::new())?;
        events::follow(handle, global).await
    } else {
        output::notice("Press Ctrl-C to stop", global.quiet);
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

/// Poll the health endpoint until the daemon answers.
async fn wait_until_ready(client: &Client) -> Result<(), CliError> {
    let mut last_err = None;
    for attempt in 1..=READY_ATTEMPTS {
        match client.get_health().await {
            Ok(health) if health.is_ok() => return Ok(()),
            Ok(health) => debug!(attempt, status = %health.status, "daemon not ready"),
            Err(e) => {
                debug!(attempt, error = %e, "daemon not reachable yet");
                last_err = Some(e);
            }
        }
        tokio::time::sleep(READY_INTERVAL).await;
    }
    Err(last_err.map_or(CliError::Timeout, CliError::from))
}

fn env_lines(vars: &BTreeMap<String, String>) -> String {
    vars.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n")
}
