use std::collections::VecDeque;

use scout_core::{update, AppState, AppViewModel, Effect, Msg};
use scout_engine::ScrapeEvent;
use scout_logging::scout_debug;

use super::effects::EffectRunner;
use super::terminal::Surface;

/// Owns the session state and drives every user action through
/// `update` and the effect runner.
pub struct ScrapeOrchestrator {
    state: AppState,
    runner: EffectRunner,
    surface: Box<dyn Surface>,
}

impl ScrapeOrchestrator {
    pub fn new(runner: EffectRunner, surface: Box<dyn Surface>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            surface,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Restores the saved session, if any. Call once before the first dispatch.
    pub async fn start(&mut self) {
        if let Some(snapshot) = self.runner.store().restore() {
            self.dispatch(Msg::SessionRestored(snapshot)).await;
        }
    }

    /// Applies `msg` and every follow-up message its effects produce.
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            scout_debug!("dispatch {:?}", msg);
            let effects = apply(&mut self.state, self.surface.as_mut(), msg);
            for effect in effects {
                inbox.extend(self.run_effect(effect).await);
            }
        }
    }

    async fn run_effect(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::RunScrape { source_url } => {
                let state = &mut self.state;
                let surface = self.surface.as_mut();
                let mut on_event = |event: ScrapeEvent| {
                    if let ScrapeEvent::CandidateProcessed {
                        processed,
                        total,
                        entry,
                        ..
                    } = event
                    {
                        let msg = Msg::CandidateProcessed {
                            processed,
                            total,
                            entry,
                        };
                        // Candidate messages never produce effects.
                        let _ = apply(state, surface, msg);
                    }
                };
                let result = self.runner.scrape(&source_url, &mut on_event).await;
                Some(match result {
                    Ok(_) => Msg::ScrapeCompleted,
                    Err(err) => Msg::ScrapeAborted {
                        reason: err.to_string(),
                    },
                })
            }
            Effect::Notify(notification) => {
                self.surface.notify(&notification);
                None
            }
            Effect::ShowPostDetails(post) => {
                self.surface.show_post_details(&post);
                None
            }
            other => self.runner.execute(other).await,
        }
    }
}

fn apply(state: &mut AppState, surface: &mut dyn Surface, msg: Msg) -> Vec<Effect> {
    let (mut next, effects) = update(std::mem::take(state), msg);
    if next.consume_dirty() {
        surface.render(&next.view());
    }
    *state = next;
    effects
}
