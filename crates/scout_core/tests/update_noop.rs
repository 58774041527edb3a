use scout_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn candidate_outside_running_scrape_is_ignored() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::CandidateProcessed {
            processed: 1,
            total: 1,
            entry: None,
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
