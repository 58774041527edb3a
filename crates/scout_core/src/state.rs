use crate::model::{Contact, ResultEntry};
use crate::phone::quick_contact_link;
use crate::view_model::{AppViewModel, ResultRowView};

/// Lifecycle of the scrape loop as seen by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrapePhase {
    #[default]
    Idle,
    Running,
    Finished,
    Aborted,
}

/// Source URL, accumulated results and loop progress for the current scrape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub source_url: String,
    pub results: Vec<ResultEntry>,
    /// Fraction of candidates processed, in `[0, 1]`.
    pub progress: f64,
}

impl SessionState {
    pub fn contains_phone(&self, phone_number: &str) -> bool {
        self.results
            .iter()
            .any(|entry| entry.phone_number() == phone_number)
    }

    pub fn contact(&self, phone_number: &str) -> Option<&Contact> {
        self.results
            .iter()
            .map(|entry| &entry.contact)
            .find(|contact| contact.phone_number == phone_number)
    }
}

/// The persisted part of a session: what gets written on save and read on restore.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub source_url: String,
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionState,
    phase: ScrapePhase,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> ScrapePhase {
        self.phase
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .session
            .results
            .iter()
            .enumerate()
            .map(|(idx, entry)| ResultRowView {
                index: idx + 1,
                caption: entry.post_link.caption.clone(),
                uri: entry.post_link.uri.clone(),
                name: entry.contact.name.clone(),
                phone_number: entry.contact.phone_number.clone(),
                quick_contact_link: quick_contact_link(&entry.contact.phone_number),
            })
            .collect();

        AppViewModel {
            source_url: self.session.source_url.clone(),
            phase: self.phase,
            progress: self.session.progress,
            result_count: self.session.results.len(),
            rows,
            dirty: self.dirty,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            source_url: self.session.source_url.clone(),
            results: self.session.results.clone(),
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn restore(&mut self, snapshot: SessionSnapshot) {
        self.session = SessionState {
            source_url: snapshot.source_url,
            results: dedupe(snapshot.results),
            progress: 0.0,
        };
        self.phase = ScrapePhase::Idle;
        self.mark_dirty();
    }

    pub(crate) fn set_source_url(&mut self, url: String) {
        if self.session.source_url != url {
            self.session.source_url = url;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_scrape(&mut self) {
        self.session.results.clear();
        self.session.progress = 0.0;
        self.phase = ScrapePhase::Running;
        self.mark_dirty();
    }

    /// Records one processed candidate. Returns whether `entry` was appended.
    pub(crate) fn record_candidate(
        &mut self,
        processed: usize,
        total: usize,
        entry: Option<ResultEntry>,
    ) -> bool {
        let accepted = match entry {
            Some(entry) if !self.session.contains_phone(entry.phone_number()) => {
                self.session.results.push(entry);
                true
            }
            _ => false,
        };
        let fraction = if total == 0 {
            0.0
        } else {
            processed.min(total) as f64 / total as f64
        };
        self.session.progress = fraction.min(1.0);
        self.mark_dirty();
        accepted
    }

    pub(crate) fn finish_scrape(&mut self) {
        self.session.progress = 1.0;
        self.phase = ScrapePhase::Finished;
        self.mark_dirty();
    }

    pub(crate) fn abort_scrape(&mut self) {
        self.session.progress = 0.0;
        self.phase = ScrapePhase::Aborted;
        self.mark_dirty();
    }

    pub(crate) fn remove_first(&mut self, phone_number: &str) -> Option<ResultEntry> {
        let idx = self
            .session
            .results
            .iter()
            .position(|entry| entry.phone_number() == phone_number)?;
        self.mark_dirty();
        Some(self.session.results.remove(idx))
    }

    pub(crate) fn rename_contact(&mut self, phone_number: &str, name: Option<String>) -> bool {
        let Some(entry) = self
            .session
            .results
            .iter_mut()
            .find(|entry| entry.phone_number() == phone_number)
        else {
            return false;
        };
        entry.contact.name = name;
        self.mark_dirty();
        true
    }
}

fn dedupe(results: Vec<ResultEntry>) -> Vec<ResultEntry> {
    let mut unique: Vec<ResultEntry> = Vec::with_capacity(results.len());
    for entry in results {
        if !unique
            .iter()
            .any(|existing| existing.phone_number() == entry.phone_number())
        {
            unique.push(entry);
        }
    }
    unique
}
