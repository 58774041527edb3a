//! Scout core: data model, pure session state machine and view-model helpers.
mod effect;
mod model;
mod msg;
mod phone;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notification, Severity};
pub use model::{Contact, Post, PostLink, ResultEntry};
pub use msg::Msg;
pub use phone::{normalize_phone_number, quick_contact_link, COUNTRY_CODE, DEEP_LINK_SCHEME};
pub use state::{AppState, ScrapePhase, SessionSnapshot, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, ResultRowView};
