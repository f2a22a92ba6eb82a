//! Library side of the `events2pdf` binary.
//!
//! [`pipeline::run`] renders and writes a schedule for an already resolved
//! [`e2p_model::Config`], so the whole pipeline can be driven without the CLI.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;

pub use pipeline::{PipelineError, RenderedSchedule, configure, render_schedule, run};
pub use types::{RunSummary, SectionSummary};
