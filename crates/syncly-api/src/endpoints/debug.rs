// Debug endpoints. Profiles and the support bundle are binary downloads.

use bytes::Bytes;

use crate::client::Client;
use crate::error::Error;
use crate::query::Query;

impl Client {
    /// 30-second CPU profile in pprof format.
    ///
    /// `GET /rest/debug/cpuprof`
    pub async fn get_debug_cpu_profile(&self) -> Result<Bytes, Error> {
        self.get_bytes(&["debug", "cpuprof"], &Query::new()).await
    }

    /// `GET /rest/debug/heapprof`
    pub async fn get_debug_heap_profile(&self) -> Result<Bytes, Error> {
        self.get_bytes(&["debug", "heapprof"], &Query::new()).await
    }

    /// Zip archive with config, logs and usage data.
    ///
    /// `GET /rest/debug/support`
    pub async fn get_debug_support(&self) -> Result<Bytes, Error> {
        self.get_bytes(&["debug", "support"], &Query::new()).await
    }

    /// Internal index details for one file.
    ///
    /// `GET /rest/debug/file?folder=...&file=...`
    pub async fn get_debug_file(&self, folder: &str, file: &str) -> Result<serde_json::Value, Error> {
        let query = Query::new().with("folder", folder).with("file", file);
        self.get_json(&["debug", "file"], &query).await
    }
}
