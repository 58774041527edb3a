use crate::{Contact, Post, ResultEntry, SessionSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the source URL input.
    SourceUrlChanged(String),
    /// Session restored from local storage at startup.
    SessionRestored(SessionSnapshot),
    /// User clicked Process.
    ScrapeClicked,
    /// Engine finished one candidate. `processed` counts candidates done so far.
    CandidateProcessed {
        processed: usize,
        total: usize,
        entry: Option<ResultEntry>,
    },
    /// Engine processed every candidate.
    ScrapeCompleted,
    /// Engine stopped on a non-recoverable failure.
    ScrapeAborted { reason: String },
    /// User clicked Save.
    SaveClicked,
    SessionSaved,
    SaveFailed { reason: String },
    CopyClicked { phone_number: String },
    BlockClicked { phone_number: String },
    PhoneBlocked { phone_number: String },
    BlockFailed { phone_number: String },
    EditClicked { phone_number: String },
    /// Contact editor confirmed with new values.
    ContactEdited(Contact),
    /// Backend accepted the contact upsert.
    ContactSaved(Contact),
    ContactSaveFailed { phone_number: String },
    DetailsClicked { post_uri: String },
    PostDetailsLoaded(Post),
    PostNotFound { post_uri: String },
    PostDetailsFailed { post_uri: String },
    /// Fallback for placeholder wiring.
    NoOp,
}
