use scout_core::Contact;
use scout_logging::{scout_debug, scout_warn};
use tokio::sync::{mpsc, oneshot};

use super::terminal;

/// An open contact editor waiting for an answer.
///
/// Dropping the request without answering counts as a cancel.
#[derive(Debug)]
pub struct EditRequest {
    initial: Contact,
    reply: oneshot::Sender<Option<Contact>>,
}

impl EditRequest {
    pub fn initial(&self) -> &Contact {
        &self.initial
    }

    pub fn confirm(self, contact: Contact) {
        let _ = self.reply.send(Some(contact));
    }

    /// Confirms with a new name and the original phone number.
    pub fn confirm_name(self, name: impl Into<String>) {
        let contact = self.initial.clone().with_name(name);
        self.confirm(contact);
    }

    pub fn cancel(self) {
        let _ = self.reply.send(None);
    }
}

/// Caller side of the editor boundary: submit the initial contact, suspend
/// until the editor answers.
#[derive(Debug, Clone)]
pub struct ContactEditor {
    requests: mpsc::Sender<EditRequest>,
}

impl ContactEditor {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<EditRequest>) {
        let (requests, rx) = mpsc::channel(capacity.max(1));
        (Self { requests }, rx)
    }

    /// Returns the confirmed contact, or `None` when the edit was cancelled.
    pub async fn edit(&self, initial: Contact) -> Option<Contact> {
        let (reply, answer) = oneshot::channel();
        let phone_number = initial.phone_number.clone();
        if self
            .requests
            .send(EditRequest { initial, reply })
            .await
            .is_err()
        {
            scout_warn!("No contact editor attached; edit of {} dropped", phone_number);
            return None;
        }
        let result = answer.await.ok().flatten();
        scout_debug!(
            "Editor for {} closed ({})",
            phone_number,
            if result.is_some() { "confirmed" } else { "cancelled" }
        );
        result
    }
}

/// Answers edit requests by prompting on the terminal. An empty answer cancels.
pub async fn serve_terminal_editor(mut requests: mpsc::Receiver<EditRequest>) {
    while let Some(request) = requests.recv().await {
        let current = request.initial().name.clone().unwrap_or_default();
        let prompt = format!(
            "Name for {} [{}] (empty to cancel): ",
            request.initial().phone_number,
            current
        );
        match terminal::prompt(&prompt).await {
            Ok(Some(answer)) if !answer.trim().is_empty() => {
                request.confirm_name(answer.trim());
            }
            Ok(_) => request.cancel(),
            Err(err) => {
                scout_warn!("Failed to read editor input: {}", err);
                request.cancel();
            }
        }
    }
}
