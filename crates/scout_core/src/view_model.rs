use crate::ScrapePhase;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub source_url: String,
    pub phase: ScrapePhase,
    pub progress: f64,
    pub result_count: usize,
    pub rows: Vec<ResultRowView>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn progress_percent(&self) -> f64 {
        (self.progress * 100.0).clamp(0.0, 100.0)
    }

    /// Looks up a row by its 1-based display index.
    pub fn row(&self, index: usize) -> Option<&ResultRowView> {
        index.checked_sub(1).and_then(|idx| self.rows.get(idx))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub index: usize,
    pub caption: String,
    pub uri: String,
    pub name: Option<String>,
    pub phone_number: String,
    pub quick_contact_link: String,
}
