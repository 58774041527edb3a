use url::Url;

use crate::{AppState, Contact, Effect, Msg, Notification, ScrapePhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SourceUrlChanged(raw) => {
            if state.phase() != ScrapePhase::Running {
                state.set_source_url(raw.trim().to_string());
            }
            Vec::new()
        }
        Msg::SessionRestored(snapshot) => {
            if state.phase() == ScrapePhase::Running {
                return (state, Vec::new());
            }
            state.restore(snapshot);
            Vec::new()
        }
        Msg::ScrapeClicked => {
            if state.phase() == ScrapePhase::Running {
                return (state, Vec::new());
            }
            let source_url = state.session().source_url.clone();
            if !is_scrapeable(&source_url) {
                return (
                    state,
                    vec![Effect::Notify(Notification::danger("Invalid source URL"))],
                );
            }
            state.begin_scrape();
            vec![Effect::RunScrape { source_url }]
        }
        Msg::CandidateProcessed {
            processed,
            total,
            entry,
        } => {
            if state.phase() == ScrapePhase::Running {
                state.record_candidate(processed, total, entry);
            }
            Vec::new()
        }
        Msg::ScrapeCompleted => {
            if state.phase() == ScrapePhase::Running {
                state.finish_scrape();
            }
            Vec::new()
        }
        Msg::ScrapeAborted { .. } => {
            if state.phase() != ScrapePhase::Running {
                return (state, Vec::new());
            }
            state.abort_scrape();
            vec![Effect::Notify(Notification::danger("Data processing error"))]
        }
        Msg::SaveClicked => vec![Effect::PersistSession(state.snapshot())],
        Msg::SessionSaved => vec![Effect::Notify(Notification::success(
            "Data saved successfully",
        ))],
        Msg::SaveFailed { .. } => vec![Effect::Notify(Notification::danger(
            "Failed to save data",
        ))],
        Msg::CopyClicked { phone_number } => {
            let notification =
                Notification::success(format!("Phone {phone_number} copied successfully"));
            vec![
                Effect::CopyToClipboard { text: phone_number },
                Effect::Notify(notification),
            ]
        }
        Msg::BlockClicked { phone_number } => vec![Effect::BlockPhoneNumber { phone_number }],
        Msg::PhoneBlocked { phone_number } => {
            state.remove_first(&phone_number);
            vec![Effect::Notify(Notification::success(format!(
                "Phone {phone_number} blocked successfully"
            )))]
        }
        Msg::BlockFailed { .. } => vec![Effect::Notify(Notification::danger(
            "Failed to block phone number",
        ))],
        Msg::EditClicked { phone_number } => {
            let contact = state
                .session()
                .contact(&phone_number)
                .cloned()
                .unwrap_or_else(|| Contact::new(phone_number));
            vec![Effect::OpenContactEditor { contact }]
        }
        Msg::ContactEdited(contact) => vec![Effect::UpsertContact(contact)],
        Msg::ContactSaved(contact) => {
            state.rename_contact(&contact.phone_number, contact.name.clone());
            vec![
                Effect::UpdateStoredContact(contact),
                Effect::Notify(Notification::success("Contact saved successfully")),
            ]
        }
        Msg::ContactSaveFailed { .. } => vec![Effect::Notify(Notification::danger(
            "Failed to save contact",
        ))],
        Msg::DetailsClicked { post_uri } => vec![Effect::FetchPostDetails { post_uri }],
        Msg::PostDetailsLoaded(post) => vec![Effect::ShowPostDetails(post)],
        Msg::PostNotFound { .. } => vec![Effect::Notify(Notification::danger("Page not found"))],
        Msg::PostDetailsFailed { .. } => vec![Effect::Notify(Notification::danger(
            "Failed to load post details",
        ))],
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_scrapeable(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
