//! Query orchestration: root resolution, the throttled push loop, and the
//! two-phase local then index search.

mod options;
mod orchestrator;
mod pump;
mod root;
mod worker;

pub use options::{DEFAULT_MOUNT_MARKER, SearchOptions};
pub use orchestrator::{SearchOrchestrator, SearchReport};
pub use pump::StreamPump;
pub use root::{IndexMode, SearchRoot};
pub use worker::{SearchHandle, spawn_search};
