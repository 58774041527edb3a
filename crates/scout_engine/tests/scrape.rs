use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use pretty_assertions::assert_eq;
use scout_core::{Contact, Post, PostLink};
use scout_engine::{
    run_scrape, Backend, CandidateOutcome, FailureKind, FetchError, NoDelay, ScrapeError,
    ScrapeEvent,
};

#[derive(Clone)]
enum PhoneReply {
    Number(&'static str),
    Fail(FailureKind),
}

#[derive(Default)]
struct ScriptedBackend {
    contacts: Vec<Contact>,
    links: Vec<PostLink>,
    phones: HashMap<String, PhoneReply>,
    blacklist: HashSet<String>,
    phone_requests: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn with_links(links: &[&str]) -> Self {
        Self {
            links: links
                .iter()
                .map(|uri| PostLink::new(*uri, format!("caption {uri}")))
                .collect(),
            ..Self::default()
        }
    }

    fn phone(mut self, uri: &str, reply: PhoneReply) -> Self {
        self.phones.insert(uri.to_string(), reply);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.phone_requests.lock().unwrap().clone()
    }
}

fn error(kind: FailureKind) -> FetchError {
    FetchError::new(kind.clone(), kind.to_string())
}

#[async_trait::async_trait]
impl Backend for ScriptedBackend {
    async fn contacts(&self) -> Result<Vec<Contact>, FetchError> {
        Ok(self.contacts.clone())
    }

    async fn upsert_contact(&self, _contact: &Contact) -> Result<(), FetchError> {
        Ok(())
    }

    async fn post_links(&self, _source_uri: &str) -> Result<Vec<PostLink>, FetchError> {
        Ok(self.links.clone())
    }

    async fn phone_number(&self, post_link_uri: &str) -> Result<String, FetchError> {
        self.phone_requests
            .lock()
            .unwrap()
            .push(post_link_uri.to_string());
        match self.phones.get(post_link_uri) {
            Some(PhoneReply::Number(number)) => Ok(number.to_string()),
            Some(PhoneReply::Fail(kind)) => Err(error(kind.clone())),
            None => Ok(String::new()),
        }
    }

    async fn post_details(&self, _post_link_uri: &str) -> Result<Post, FetchError> {
        Err(error(FailureKind::NotFound))
    }

    async fn is_number_allowed(&self, phone_number: &str) -> Result<bool, FetchError> {
        Ok(!self.blacklist.contains(phone_number))
    }

    async fn block_number(&self, _phone_number: &str) -> Result<(), FetchError> {
        Ok(())
    }
}

#[tokio::test]
async fn accepts_unique_allowed_numbers_and_resolves_names() {
    let mut backend = ScriptedBackend::with_links(&["p1", "p2", "p3", "p4", "p5"])
        .phone("p1", PhoneReply::Number("0991"))
        .phone("p2", PhoneReply::Number(""))
        .phone("p3", PhoneReply::Number("0666"))
        .phone("p4", PhoneReply::Number("0991"))
        .phone("p5", PhoneReply::Number("0995"));
    backend.blacklist.insert("0666".to_string());
    backend.contacts = vec![
        Contact::new("0995").with_name("Olena"),
        Contact::new("0995").with_name("Shadowed"),
    ];

    let mut events = Vec::new();
    let summary = run_scrape(
        &backend,
        &NoDelay,
        "https://board.example.com",
        &mut |event: ScrapeEvent| events.push(event),
    )
    .await
    .expect("scrape");

    let phones: Vec<_> = summary
        .accepted
        .iter()
        .map(|entry| (entry.phone_number(), entry.contact.name.as_deref()))
        .collect();
    assert_eq!(phones, vec![("0991", None), ("0995", Some("Olena"))]);
    assert_eq!(summary.accepted[0].post_link.uri, "p1");
    assert_eq!(summary.total, 5);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.rejected, 2);

    let outcomes: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            ScrapeEvent::CandidateProcessed {
                processed, outcome, ..
            } => Some((*processed, *outcome)),
            ScrapeEvent::Started { .. } => None,
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![
            (1, CandidateOutcome::Accepted),
            (2, CandidateOutcome::NoPhoneNumber),
            (3, CandidateOutcome::Blacklisted),
            (4, CandidateOutcome::Duplicate),
            (5, CandidateOutcome::Accepted),
        ]
    );
    assert_eq!(events[0], ScrapeEvent::Started { total: 5 });
}

#[tokio::test]
async fn not_found_candidate_is_skipped() {
    let backend = ScriptedBackend::with_links(&["p1", "p2"])
        .phone("p1", PhoneReply::Fail(FailureKind::NotFound))
        .phone("p2", PhoneReply::Number("0992"));

    let mut processed = 0;
    let summary = run_scrape(
        &backend,
        &NoDelay,
        "https://board.example.com",
        &mut |event: ScrapeEvent| {
            if matches!(event, ScrapeEvent::CandidateProcessed { .. }) {
                processed += 1;
            }
        },
    )
    .await
    .expect("scrape");

    assert_eq!(processed, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.accepted.len(), 1);
}

#[tokio::test]
async fn other_failure_aborts_without_touching_later_candidates() {
    let backend = ScriptedBackend::with_links(&["p1", "p2", "p3"])
        .phone("p1", PhoneReply::Number("0991"))
        .phone("p2", PhoneReply::Fail(FailureKind::HttpStatus(500)))
        .phone("p3", PhoneReply::Number("0993"));

    let mut events = Vec::new();
    let err = run_scrape(
        &backend,
        &NoDelay,
        "https://board.example.com",
        &mut |event: ScrapeEvent| events.push(event),
    )
    .await
    .unwrap_err();

    match &err {
        ScrapeError::Candidate { index, uri, source } => {
            assert_eq!(*index, 2);
            assert_eq!(uri, "p2");
            assert_eq!(source.kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(backend.requested(), vec!["p1".to_string(), "p2".to_string()]);
    // Started + the first candidate only.
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn empty_candidate_list_completes_immediately() {
    let backend = ScriptedBackend::default();

    let mut events = Vec::new();
    let summary = run_scrape(
        &backend,
        &NoDelay,
        "https://board.example.com",
        &mut |event: ScrapeEvent| events.push(event),
    )
    .await
    .expect("scrape");

    assert_eq!(summary.total, 0);
    assert!(summary.accepted.is_empty());
    assert_eq!(events, vec![ScrapeEvent::Started { total: 0 }]);
}
