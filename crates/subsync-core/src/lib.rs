//! subsync core: fetch proxy subscription lists, keep the lines with accepted
//! scheme prefixes, and rewrite the local artifact only when the body changed.
//!
//! Pipeline per source: fetch → filter → artifact change check → persist.

pub mod config;
pub mod logging;

pub mod artifact;
pub mod checksum;
pub mod fetch;
pub mod filter;
pub mod outcome;
pub mod pipeline;
pub mod scheduler;
pub mod source;

pub use artifact::ArtifactStore;
pub use fetch::{CurlFetcher, FetchResult, Fetcher};
pub use filter::{filter_lines, FilterOptions, FilterStats, FilteredBody};
pub use outcome::{OutcomeStatus, RunOutcome, RunReport, SuccessPolicy};
pub use pipeline::{run_pipeline, PipelineContext};
pub use scheduler::Orchestrator;
pub use source::Source;
