use e2p_model::CoverWarning;

/// Outcome of one successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub input: String,
    pub output: String,
    pub events_loaded: usize,
    pub sections: Vec<SectionSummary>,
    pub cover_warnings: Vec<CoverWarning>,
    /// Size of the rendered document.
    pub bytes: usize,
}

impl RunSummary {
    /// Events that passed the attendance filter.
    pub fn events_kept(&self) -> usize {
        self.sections.iter().map(|section| section.events).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub label: String,
    pub events: usize,
}
