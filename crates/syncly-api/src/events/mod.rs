// Event model for the daemon's `/rest/events` feed.
//
// Every event kind maps to one typed payload. A payload that does not
// match its schema, or a kind this crate does not know, still arrives as
// `EventData::Unknown` carrying the raw JSON.

pub mod payloads;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, warn};

use crate::models::ConfigDocument;
use crate::query::Query;

use self::payloads::{
    ClusterConfigReceived, DeviceConnected, DeviceDisconnected, DeviceDiscovered, DeviceRef,
    DeviceRejected, DownloadProgress, Failure, FolderCompletion, FolderErrorsData,
    FolderRef, FolderRejected, FolderScanProgress, FolderSummary, FolderWatchStateChanged,
    ItemFinished, ItemStarted, ListenAddressesChanged, LocalChangeDetected, LocalIndexUpdated,
    LoginAttempt, PendingDevicesChanged, PendingFoldersChanged, RemoteChangeDetected,
    RemoteDownloadProgress, RemoteIndexUpdated, StartupComplete, Starting, StateChanged,
};

// ── Kinds and payloads ───────────────────────────────────────────────

macro_rules! event_kinds {
    ($($kind:ident => $payload:ty),+ $(,)?) => {
        /// Every event kind the daemon emits. The string form is the
        /// wire name, e.g. `FolderSummary`.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Display, EnumString, EnumIter, IntoStaticStr, Serialize, Deserialize,
        )]
        pub enum EventType {
            $($kind,)+
        }

        /// Payload of an event, discriminated by kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum EventData {
            $($kind($payload),)+
            /// Unrecognized kind, or a payload that did not match its schema.
            Unknown {
                kind: String,
                data: serde_json::Value,
            },
        }

        impl EventData {
            /// `None` for [`EventData::Unknown`].
            pub fn event_type(&self) -> Option<EventType> {
                match self {
                    $(Self::$kind(_) => Some(EventType::$kind),)+
                    Self::Unknown { .. } => None,
                }
            }

            fn decode(kind: EventType, data: &serde_json::Value) -> Result<Self, serde_json::Error> {
                Ok(match kind {
                    $(EventType::$kind => Self::$kind(<$payload>::deserialize(data)?),)+
                })
            }

            fn encode(&self) -> (String, serde_json::Value) {
                match self {
                    $(Self::$kind(payload) => (
                        EventType::$kind.to_string(),
                        serde_json::to_value(payload).unwrap_or_default(),
                    ),)+
                    Self::Unknown { kind, data } => (kind.clone(), data.clone()),
                }
            }
        }
    };
}

event_kinds! {
    ClusterConfigReceived => ClusterConfigReceived,
    ConfigSaved => Box<ConfigDocument>,
    DeviceConnected => DeviceConnected,
    DeviceDisconnected => DeviceDisconnected,
    DeviceDiscovered => DeviceDiscovered,
    DevicePaused => DeviceRef,
    DeviceRejected => DeviceRejected,
    DeviceResumed => DeviceRef,
    DownloadProgress => DownloadProgress,
    Failure => Failure,
    FolderCompletion => FolderCompletion,
    FolderErrors => FolderErrorsData,
    FolderPaused => FolderRef,
    FolderRejected => FolderRejected,
    FolderResumed => FolderRef,
    FolderScanProgress => FolderScanProgress,
    FolderSummary => Box<FolderSummary>,
    FolderWatchStateChanged => FolderWatchStateChanged,
    ItemFinished => ItemFinished,
    ItemStarted => ItemStarted,
    ListenAddressesChanged => ListenAddressesChanged,
    LocalChangeDetected => LocalChangeDetected,
    LocalIndexUpdated => LocalIndexUpdated,
    LoginAttempt => LoginAttempt,
    PendingDevicesChanged => PendingDevicesChanged,
    PendingFoldersChanged => PendingFoldersChanged,
    RemoteChangeDetected => RemoteChangeDetected,
    RemoteDownloadProgress => RemoteDownloadProgress,
    RemoteIndexUpdated => RemoteIndexUpdated,
    Starting => Starting,
    StartupComplete => StartupComplete,
    StateChanged => StateChanged,
}

// ── Event ────────────────────────────────────────────────────────────

/// One entry of the event feed.
///
/// `id` is the cursor: strictly increasing within a daemon run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEvent", into = "RawEvent")]
pub struct Event {
    pub id: u64,
    pub global_id: u64,
    pub time: DateTime<FixedOffset>,
    pub data: EventData,
}

impl Event {
    pub fn event_type(&self) -> Option<EventType> {
        self.data.event_type()
    }

    /// Wire name of the kind, including kinds this crate does not know.
    pub fn kind(&self) -> &str {
        match &self.data {
            EventData::Unknown { kind, .. } => kind,
            other => other.event_type().map_or("", <&'static str>::from),
        }
    }

    pub fn is(&self, kind: EventType) -> bool {
        self.event_type() == Some(kind)
    }
}

/// Wire shape of an event.
#[derive(Serialize, Deserialize)]
struct RawEvent {
    id: u64,
    #[serde(rename = "globalID", default)]
    global_id: u64,
    time: DateTime<FixedOffset>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let data = match raw.kind.parse::<EventType>() {
            Ok(kind) => {
                let empty = serde_json::Value::Object(serde_json::Map::new());
                let source = if raw.data.is_null() { &empty } else { &raw.data };
                match EventData::decode(kind, source) {
                    Ok(data) => data,
                    Err(e) => {
                        debug!(id = raw.id, kind = %raw.kind, error = %e, "event payload did not match its schema");
                        EventData::Unknown {
                            kind: raw.kind,
                            data: raw.data,
                        }
                    }
                }
            }
            Err(_) => EventData::Unknown {
                kind: raw.kind,
                data: raw.data,
            },
        };

        Self {
            id: raw.id,
            global_id: raw.global_id,
            time: raw.time,
            data,
        }
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        let (kind, data) = event.data.encode();
        Self {
            id: event.id,
            global_id: event.global_id,
            time: event.time,
            kind,
            data,
        }
    }
}

// ── Batch ────────────────────────────────────────────────────────────

/// One response of the feed, decoded event by event.
///
/// An envelope that fails to decode is logged and skipped; its id still
/// counts toward `last_id` so the cursor can move past it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
    pub events: Vec<Event>,
    /// Highest id in the response, decoded or not.
    pub last_id: Option<u64>,
}

impl EventBatch {
    pub fn decode(values: Vec<serde_json::Value>) -> Self {
        let mut batch = Self::default();
        for value in values {
            let id = value.get("id").and_then(serde_json::Value::as_u64);
            match serde_json::from_value::<Event>(value) {
                Ok(event) => {
                    batch.last_id = batch.last_id.max(Some(event.id));
                    batch.events.push(event);
                }
                Err(e) => {
                    warn!(id, error = %e, "skipping undecodable event");
                    batch.last_id = batch.last_id.max(id);
                }
            }
        }
        batch
    }
}

// ── Query ────────────────────────────────────────────────────────────

/// Parameters of one `GET /rest/events` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Only events with a greater id are returned.
    pub since: Option<u64>,
    pub limit: Option<u32>,
    /// Seconds the daemon may hold the request open waiting for events.
    pub timeout: Option<u64>,
    /// Empty means every kind.
    pub events: Vec<EventType>,
}

impl EventQuery {
    pub fn since(id: u64) -> Self {
        Self {
            since: Some(id),
            ..Self::default()
        }
    }

    pub fn with_types(mut self, events: impl IntoIterator<Item = EventType>) -> Self {
        self.events = events.into_iter().collect();
        self
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .with_opt("since", self.since)
            .with_opt("limit", self.limit)
            .with_opt("timeout", self.timeout)
            .with_list("events", &self.events)
    }
}
