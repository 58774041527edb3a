//! Scout app: the scrape orchestrator, its terminal surfaces and configuration.
pub mod config;
mod platform;

pub use platform::app::ScrapeOrchestrator;
pub use platform::editor::{serve_terminal_editor, ContactEditor, EditRequest};
pub use platform::effects::EffectRunner;
pub use platform::logging::{initialize as initialize_logging, LogDestination};
pub use platform::persistence::{SessionStore, RESULTS_KEY, URL_KEY};
pub use platform::terminal::{
    prompt, read_line, Clipboard, Osc52Clipboard, Surface, TerminalSurface,
};
pub use platform::ui::commands::{parse_command, Command, CommandError, HELP};
pub use platform::ui::render::{progress_bar, render_post, render_status, render_table};
