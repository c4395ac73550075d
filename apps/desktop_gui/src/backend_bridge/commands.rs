//! Backend commands queued from UI to the fetch worker.

use shared::domain::ResourceKind;

pub enum BackendCommand {
    /// Start a paginated fetch for one grid activation. `generation` tags
    /// every event the run emits so stale results are discarded.
    FetchRecords {
        kind: ResourceKind,
        generation: u64,
    },
    /// Stop whatever fetch is in flight; the owning view was torn down.
    CancelActiveFetch,
}
