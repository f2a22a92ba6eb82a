//! Schedule rendering pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Config**: Load the config file and apply command-line overrides
//! 2. **Load**: Read the event feed from a file, stdin or a URL
//! 3. **Group**: Filter by attendance option and partition into sections
//! 4. **Format**: Turn every event into a three-cell row
//! 5. **Cover**: Build the date stamp and cover page elements
//! 6. **Layout**: Compute geometry and assemble the document model
//! 7. **Render**: Produce PDF bytes
//! 8. **Write**: Send the bytes to the output file or stdout
//!
//! Each stage runs in a span named after it and fails with an error that
//! reports its [`Stage`]. Nothing is written until rendering has succeeded.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, info_span};

use e2p_core::{
    LayoutInput, build_cover, compute_geometry, format_sections, group, layout, today_datestamp,
};
use e2p_ingest::{ConfigError, ConfigOverrides, InputSource, LoadError, load_events, resolve_config};
use e2p_model::{
    Config, DocumentRenderer, FormatError, GroupError, LayoutError, RenderError, Section, Stage,
};
use e2p_render::PdfRenderer;

use crate::types::{RunSummary, SectionSummary};

/// Output sink value meaning standard output.
pub const STDOUT_SINK: &str = "-";

/// A failed run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Group(#[from] GroupError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write {sink}: {source}")]
    Output {
        sink: String,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Config(_) => Stage::Config,
            PipelineError::Load(_) => Stage::InputLoad,
            PipelineError::Group(_) => Stage::FilterGroup,
            PipelineError::Format(_) => Stage::Format,
            PipelineError::Layout(_) => Stage::Layout,
            PipelineError::Render(_) => Stage::Render,
            PipelineError::Output { .. } => Stage::Output,
        }
    }
}

/// A rendered document that has not been written anywhere yet.
#[derive(Debug)]
pub struct RenderedSchedule {
    pub pdf: Vec<u8>,
    pub summary: RunSummary,
}

/// Resolve the run configuration.
///
/// # Errors
///
/// Fails if the config file cannot be read or parsed, or a value is invalid.
pub fn configure(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<Config, PipelineError> {
    let span = info_span!("config");
    span.in_scope(|| {
        resolve_config(path, overrides)
            .inspect_err(|error| error!(%error, "configuration failed"))
            .map_err(PipelineError::from)
    })
}

/// Run every stage up to and including rendering, keeping the PDF in memory.
///
/// # Errors
///
/// Returns the first stage failure.
pub fn render_schedule(config: &Config) -> Result<RenderedSchedule, PipelineError> {
    let source = InputSource::parse(&config.input);

    let span = info_span!("load", source = %source);
    let events = span.in_scope(|| {
        load_events(&source).inspect_err(|error| error!(%error, "input load failed"))
    })?;
    let events_loaded = events.len();

    let span = info_span!("group", sections = config.sections.len());
    let sections = span.in_scope(|| {
        group(events, &config.types, &config.sections)
            .inspect_err(|error| error!(%error, "grouping failed"))
    })?;
    let counts = section_counts(&sections);

    let span = info_span!("format");
    let formatted = span.in_scope(|| {
        format_sections(&sections, &config.designations)
            .inspect_err(|error| error!(%error, "formatting failed"))
    })?;

    let page = config.page_config();
    let styles = config.style_sheet();
    let geometry = info_span!("layout").in_scope(|| {
        compute_geometry(&page).inspect_err(|error| error!(%error, "page geometry failed"))
    })?;

    let span = info_span!("cover");
    let cover = span.in_scope(|| {
        build_cover(
            &today_datestamp(),
            config.cover_page.as_deref(),
            geometry.frame_width(),
            config.cover_scale,
            &styles.cover,
        )
    });
    let cover_warnings = cover.warnings;

    let span = info_span!("layout");
    let document = span.in_scope(|| {
        layout(
            formatted,
            cover.elements,
            LayoutInput {
                page: &page,
                styles: &styles,
                language: &config.language,
            },
        )
        .inspect_err(|error| error!(%error, "layout failed"))
    })?;

    let span = info_span!("render", elements = document.elements.len());
    let pdf = span.in_scope(|| {
        PdfRenderer::new()
            .render(&document)
            .inspect_err(|error| error!(%error, "rendering failed"))
    })?;

    let summary = RunSummary {
        input: source.to_string(),
        output: config.output.clone(),
        events_loaded,
        sections: counts,
        cover_warnings,
        bytes: pdf.len(),
    };
    Ok(RenderedSchedule { pdf, summary })
}

/// Render the schedule and write it to the configured sink.
///
/// # Errors
///
/// Returns the first stage failure. On failure the sink is left untouched.
pub fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    let RenderedSchedule { pdf, summary } = render_schedule(config)?;

    let span = info_span!("write", sink = %config.output);
    span.in_scope(|| {
        write_output(&config.output, &pdf).inspect_err(|error| error!(%error, "write failed"))
    })?;
    info!(
        output = %summary.output,
        events = summary.events_kept(),
        bytes = summary.bytes,
        "schedule written"
    );
    Ok(summary)
}

/// Write `bytes` to a file, or to stdout for [`STDOUT_SINK`].
///
/// # Errors
///
/// Returns [`PipelineError::Output`] if the sink cannot be written.
pub fn write_output(sink: &str, bytes: &[u8]) -> Result<(), PipelineError> {
    let result = if sink == STDOUT_SINK {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes).and_then(|()| stdout.flush())
    } else {
        fs::write(PathBuf::from(sink), bytes)
    };
    result.map_err(|source| PipelineError::Output {
        sink: sink.to_string(),
        source,
    })
}

fn section_counts(sections: &[Section]) -> Vec<SectionSummary> {
    sections
        .iter()
        .map(|section| SectionSummary {
            label: section.label.clone(),
            events: section.len(),
        })
        .collect()
}
