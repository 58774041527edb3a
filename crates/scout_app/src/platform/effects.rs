use std::sync::Arc;

use scout_core::{Effect, Msg};
use scout_engine::{run_scrape, Backend, Delay, ProgressSink, ScrapeError, ScrapeSummary};
use scout_logging::{scout_debug, scout_error, scout_info, scout_warn};

use super::editor::ContactEditor;
use super::persistence::SessionStore;
use super::terminal::Clipboard;

/// Executes the I/O side of effects and turns results back into messages.
pub struct EffectRunner {
    backend: Arc<dyn Backend>,
    delay: Arc<dyn Delay>,
    store: SessionStore,
    editor: ContactEditor,
    clipboard: Box<dyn Clipboard>,
}

impl EffectRunner {
    pub fn new(
        backend: Arc<dyn Backend>,
        delay: Arc<dyn Delay>,
        store: SessionStore,
        editor: ContactEditor,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self {
            backend,
            delay,
            store,
            editor,
            clipboard,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub async fn scrape(
        &self,
        source_url: &str,
        sink: &mut dyn ProgressSink,
    ) -> Result<ScrapeSummary, ScrapeError> {
        run_scrape(self.backend.as_ref(), self.delay.as_ref(), source_url, sink).await
    }

    /// Runs one effect. Effects that only touch the screen or need state
    /// access are handled by the orchestrator and never reach this point.
    pub async fn execute(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::PersistSession(snapshot) => match self.store.save(&snapshot) {
                Ok(()) => Some(Msg::SessionSaved),
                Err(err) => {
                    scout_error!("Failed to save session: {}", err);
                    Some(Msg::SaveFailed {
                        reason: err.to_string(),
                    })
                }
            },
            Effect::CopyToClipboard { text } => {
                if let Err(err) = self.clipboard.write_text(&text) {
                    scout_warn!("Clipboard write failed: {}", err);
                }
                None
            }
            Effect::BlockPhoneNumber { phone_number } => {
                match self.backend.block_number(&phone_number).await {
                    Ok(()) => {
                        scout_info!("Blocked {}", phone_number);
                        Some(Msg::PhoneBlocked { phone_number })
                    }
                    Err(err) => {
                        scout_warn!("Blocking {} failed: {}", phone_number, err);
                        Some(Msg::BlockFailed { phone_number })
                    }
                }
            }
            Effect::OpenContactEditor { contact } => {
                self.editor.edit(contact).await.map(Msg::ContactEdited)
            }
            Effect::UpsertContact(contact) => match self.backend.upsert_contact(&contact).await {
                Ok(()) => Some(Msg::ContactSaved(contact)),
                Err(err) => {
                    scout_warn!("Saving contact {} failed: {}", contact.phone_number, err);
                    Some(Msg::ContactSaveFailed {
                        phone_number: contact.phone_number,
                    })
                }
            },
            Effect::UpdateStoredContact(contact) => {
                match self.store.update_contact(&contact) {
                    Ok(true) => scout_debug!("Updated stored contact {}", contact.phone_number),
                    Ok(false) => {}
                    Err(err) => scout_warn!(
                        "Failed to update stored contact {}: {}",
                        contact.phone_number,
                        err
                    ),
                }
                None
            }
            Effect::FetchPostDetails { post_uri } => {
                match self.backend.post_details(&post_uri).await {
                    Ok(post) => Some(Msg::PostDetailsLoaded(post)),
                    Err(err) if err.is_not_found() => Some(Msg::PostNotFound { post_uri }),
                    Err(err) => {
                        scout_warn!("Loading details for {} failed: {}", post_uri, err);
                        Some(Msg::PostDetailsFailed { post_uri })
                    }
                }
            }
            Effect::RunScrape { .. } | Effect::ShowPostDetails(_) | Effect::Notify(_) => {
                scout_warn!("Effect routed to the runner by mistake: {:?}", effect);
                None
            }
        }
    }
}
