use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use scout_core::{AppViewModel, Notification, Post, ScrapePhase, Severity};

use super::ui::render;

/// Where notifications, details and state changes are shown.
pub trait Surface {
    fn notify(&mut self, notification: &Notification);
    fn show_post_details(&mut self, post: &Post);
    fn render(&mut self, view: &AppViewModel);
}

pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct TerminalSurface {
    last_phase: ScrapePhase,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for TerminalSurface {
    fn notify(&mut self, notification: &Notification) {
        match notification.severity {
            Severity::Success => println!("[ok] {}", notification.text),
            Severity::Danger => println!("[error] {}", notification.text),
        }
    }

    fn show_post_details(&mut self, post: &Post) {
        for line in render::render_post(post) {
            println!("{line}");
        }
    }

    fn render(&mut self, view: &AppViewModel) {
        let status = render::render_status(view);
        if view.phase == ScrapePhase::Running {
            // Redraw the progress line in place.
            print!("\r{status}");
            let _ = io::stdout().flush();
        } else if self.last_phase == ScrapePhase::Running {
            println!("\r{status}");
        }
        self.last_phase = view.phase;
    }
}

/// Copies through the OSC 52 terminal escape, which most modern terminals
/// forward to the system clipboard.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        out.flush()
    }
}

/// Reads one line from stdin without blocking the runtime. `None` on EOF.
pub async fn read_line() -> io::Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    })
    .await
    .map_err(io::Error::other)?
}

pub async fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    read_line().await
}
