//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod events;
pub mod folders;
pub mod pending;
pub mod system;
pub mod util;
pub mod worker;

use syncly_core::{ExternalWorker, SessionProvider};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Session over a daemon this process does not manage.
pub type Session = SessionProvider<ExternalWorker>;

/// Dispatch a daemon-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let client = session.client()?;
    match cmd {
        Command::Status => system::status(&client, global).await,
        Command::Version => system::version(&client, global).await,
        Command::Health => system::health(&client, global).await,
        Command::Ping => system::ping(&client, global).await,
        Command::Restart => system::restart(&client, global).await,
        Command::Shutdown => system::shutdown(&client, global).await,
        Command::Upgrade(args) => system::upgrade(&client, args, global).await,
        Command::Errors(args) => system::errors(&client, args, global).await,
        Command::Log(args) => system::log(&client, args, global).await,
        Command::Folders(args) => folders::handle(&client, args, global).await,
        Command::Devices(args) => devices::handle(&client, args, global).await,
        Command::Pending(args) => pending::handle(&client, args, global).await,
        Command::Events(args) => events::handle(session, args, global).await,
        // Handled before dispatch
        Command::Config(_) | Command::Completions(_) | Command::Worker(_) => Ok(()),
    }
}
