//! Support code shared by the `hseek` binary: platform directories and the
//! logging setup.
//!
//! The search engine itself lives in `hybrid-seek-core`.

pub mod app_dirs;
pub mod logging;
