// Typed shapes for the daemon's REST payloads.
//
// Every struct keeps unknown fields in a flattened `extra` map so a value
// read from the daemon can be written back without losing anything the
// daemon knows about and this crate does not.

pub mod cluster;
pub mod config;
pub mod db;
pub mod folder;
pub mod stats;
pub mod svc;
pub mod system;

use serde::{Deserialize, Deserializer};

pub use cluster::{PendingDevice, PendingDevices, PendingFolder, PendingFolderOffer, PendingFolders};
pub use config::{
    ConfigDefaults, ConfigDocument, Device, Folder, FolderDevice, GuiConfig, Ignores,
    ObservedFolder, Options, RestartRequired, Size, Versioning,
};
pub use db::{
    Availability, DbCompletion, DbFile, DbIgnores, DbStatus, FilePage, NeedFiles,
};
pub use folder::{FileError, FileVersion, FolderErrors, FolderVersions, RestoreErrors};
pub use stats::{DeviceStatistics, DeviceStats, FolderStatistics, FolderStats, LastFile};
pub use svc::{DeviceIdCheck, RandomString, UsageReport};
pub use system::{
    ConnectionInfo, Connections, Health, LogLine, Ping, SystemErrors, SystemLog, SystemPaths,
    SystemStatus, SystemUpgrade, SystemVersion,
};

/// Free-form object for fields this crate does not model.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Deserialize `null` as the type's default (the daemon sends `null` for
/// empty lists in several places).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
