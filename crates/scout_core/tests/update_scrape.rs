use std::sync::Once;

use pretty_assertions::assert_eq;
use scout_core::{
    update, AppState, Contact, Effect, Msg, Notification, PostLink, ResultEntry, ScrapePhase,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn entry(uri: &str, phone: &str) -> ResultEntry {
    ResultEntry {
        post_link: PostLink::new(uri, format!("caption for {uri}")),
        contact: Contact::new(phone),
    }
}

fn start_scrape(url: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(AppState::new(), Msg::SourceUrlChanged(url.to_string()));
    update(state, Msg::ScrapeClicked)
}

fn candidate(state: AppState, processed: usize, total: usize, e: Option<ResultEntry>) -> AppState {
    let (state, effects) = update(
        state,
        Msg::CandidateProcessed {
            processed,
            total,
            entry: e,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn scrape_clicked_emits_run_effect_with_trimmed_url() {
    init_logging();
    let (state, effects) = start_scrape("  https://example.com/board  ");

    assert_eq!(state.phase(), ScrapePhase::Running);
    assert_eq!(state.session().progress, 0.0);
    assert_eq!(
        effects,
        vec![Effect::RunScrape {
            source_url: "https://example.com/board".to_string()
        }]
    );
}

#[test]
fn scrape_clicked_rejects_invalid_url() {
    init_logging();
    let (state, effects) = start_scrape("not a url");

    assert_eq!(state.phase(), ScrapePhase::Idle);
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::danger("Invalid source URL"))]
    );
}

#[test]
fn scrape_clicked_while_running_is_ignored() {
    init_logging();
    let (state, _) = start_scrape("https://example.com");
    let (state, effects) = update(state, Msg::ScrapeClicked);

    assert_eq!(state.phase(), ScrapePhase::Running);
    assert!(effects.is_empty());
}

#[test]
fn starting_a_scrape_clears_previous_results() {
    init_logging();
    let (state, _) = start_scrape("https://example.com");
    let state = candidate(state, 1, 1, Some(entry("https://example.com/1", "0991")));
    let (state, _) = update(state, Msg::ScrapeCompleted);
    assert_eq!(state.session().results.len(), 1);

    let (state, _) = update(state, Msg::ScrapeClicked);
    assert!(state.session().results.is_empty());
    assert_eq!(state.session().progress, 0.0);
}

#[test]
fn progress_tracks_processed_fraction_and_completes_at_one() {
    init_logging();
    let (state, _) = start_scrape("https://example.com");

    let state = candidate(state, 1, 4, Some(entry("https://example.com/1", "0991")));
    assert_eq!(state.session().progress, 0.25);
    let state = candidate(state, 2, 4, None);
    assert_eq!(state.session().progress, 0.5);
    let state = candidate(state, 3, 4, None);
    let mut state = candidate(state, 4, 4, Some(entry("https://example.com/4", "0994")));
    assert_eq!(state.session().progress, 1.0);
    assert!(state.consume_dirty());

    let (state, effects) = update(state, Msg::ScrapeCompleted);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), ScrapePhase::Finished);
    assert_eq!(state.session().progress, 1.0);
    assert_eq!(state.session().results.len(), 2);
}

#[test]
fn duplicate_phone_numbers_are_not_appended() {
    init_logging();
    let (state, _) = start_scrape("https://example.com");
    let state = candidate(state, 1, 3, Some(entry("https://example.com/1", "0991")));
    let state = candidate(state, 2, 3, Some(entry("https://example.com/2", "0991")));
    let state = candidate(state, 3, 3, Some(entry("https://example.com/3", "0993")));

    let uris: Vec<_> = state
        .session()
        .results
        .iter()
        .map(|e| e.post_link.uri.as_str())
        .collect();
    assert_eq!(uris, vec!["https://example.com/1", "https://example.com/3"]);
}

#[test]
fn empty_candidate_list_completes_at_full_progress() {
    init_logging();
    let (state, _) = start_scrape("https://example.com");
    let (state, _) = update(state, Msg::ScrapeCompleted);

    assert_eq!(state.session().progress, 1.0);
    assert!(state.session().results.is_empty());
}

#[test]
fn abort_resets_progress_and_notifies() {
    init_logging();
    let (state, _) = start_scrape("https://example.com");
    let state = candidate(state, 1, 3, Some(entry("https://example.com/1", "0991")));

    let (state, effects) = update(
        state,
        Msg::ScrapeAborted {
            reason: "http status 500".to_string(),
        },
    );

    assert_eq!(state.phase(), ScrapePhase::Aborted);
    assert_eq!(state.session().progress, 0.0);
    assert_eq!(state.session().results.len(), 1);
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::danger("Data processing error"))]
    );

    let (_state, effects) = update(
        state,
        Msg::ScrapeAborted {
            reason: "late".to_string(),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn source_url_is_frozen_while_running() {
    init_logging();
    let (state, _) = start_scrape("https://example.com");
    let (state, _) = update(state, Msg::SourceUrlChanged("https://other.com".to_string()));

    assert_eq!(state.session().source_url, "https://example.com");
}
