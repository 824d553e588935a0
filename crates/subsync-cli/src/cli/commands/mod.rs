//! CLI command handlers, one file per command.

mod fetch;
mod inspect;
mod report;
mod run;
mod sources;

pub use fetch::run_fetch;
pub use inspect::run_inspect;
pub use run::{run_sync, RunOverrides};
pub use sources::run_sources;
