use crate::{Contact, Post, SessionSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RunScrape { source_url: String },
    PersistSession(SessionSnapshot),
    CopyToClipboard { text: String },
    BlockPhoneNumber { phone_number: String },
    OpenContactEditor { contact: Contact },
    UpsertContact(Contact),
    /// Patch the contact inside the persisted results, if it is stored there.
    UpdateStoredContact(Contact),
    FetchPostDetails { post_uri: String },
    ShowPostDetails(Post),
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

/// Toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub text: String,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Danger,
            text: text.into(),
        }
    }
}
