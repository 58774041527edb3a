use scout_core::{Contact, PostLink, ResultEntry};
use scout_logging::{scout_debug, scout_error, scout_info};

use crate::{
    Backend, CandidateOutcome, Delay, FetchError, ScrapeError, ScrapeEvent, ScrapeSummary,
};

/// Receives loop events as they happen.
pub trait ProgressSink {
    fn emit(&mut self, event: ScrapeEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(ScrapeEvent),
{
    fn emit(&mut self, event: ScrapeEvent) {
        self(event)
    }
}

/// Runs the fetch-validate-accumulate loop for one source page.
///
/// Candidates are processed strictly one after another with `delay` before
/// each phone lookup. A not-found failure skips the candidate; any other
/// failure stops the loop and leaves the remaining candidates untouched.
pub async fn run_scrape(
    backend: &dyn Backend,
    delay: &dyn Delay,
    source_url: &str,
    sink: &mut dyn ProgressSink,
) -> Result<ScrapeSummary, ScrapeError> {
    let contacts = backend.contacts().await.map_err(|err| {
        scout_error!("Contact directory request failed: {}", err);
        ScrapeError::Directory(err)
    })?;

    let links = backend.post_links(source_url).await.map_err(|err| {
        scout_error!("Post link request for {} failed: {}", source_url, err);
        ScrapeError::PostLinks(err)
    })?;

    let total = links.len();
    scout_info!(
        "Scraping {} candidates from {} ({} known contacts)",
        total,
        source_url,
        contacts.len()
    );
    sink.emit(ScrapeEvent::Started { total });

    let mut summary = ScrapeSummary {
        total,
        ..ScrapeSummary::default()
    };

    for (idx, link) in links.into_iter().enumerate() {
        delay.wait().await;

        let (outcome, entry) =
            match process_candidate(backend, &contacts, &summary.accepted, &link).await {
                Ok(result) => result,
                Err(err) if err.is_not_found() => {
                    scout_debug!("Candidate {} not found upstream, skipping", link.uri);
                    (CandidateOutcome::NotFound, None)
                }
                Err(err) => {
                    scout_error!(
                        "Aborting scrape at candidate {}/{} ({}): {}",
                        idx + 1,
                        total,
                        link.uri,
                        err
                    );
                    return Err(ScrapeError::Candidate {
                        index: idx + 1,
                        uri: link.uri,
                        source: err,
                    });
                }
            };

        scout_debug!("Candidate {}/{} {}: {:?}", idx + 1, total, link.uri, outcome);
        match outcome {
            CandidateOutcome::Accepted => {
                if let Some(entry) = &entry {
                    summary.accepted.push(entry.clone());
                }
            }
            CandidateOutcome::NoPhoneNumber | CandidateOutcome::NotFound => summary.skipped += 1,
            CandidateOutcome::Blacklisted | CandidateOutcome::Duplicate => summary.rejected += 1,
        }

        sink.emit(ScrapeEvent::CandidateProcessed {
            processed: idx + 1,
            total,
            outcome,
            entry,
        });
    }

    scout_info!(
        "Scrape of {} finished: {} accepted, {} skipped, {} rejected",
        source_url,
        summary.accepted.len(),
        summary.skipped,
        summary.rejected
    );
    Ok(summary)
}

async fn process_candidate(
    backend: &dyn Backend,
    contacts: &[Contact],
    accepted: &[ResultEntry],
    link: &PostLink,
) -> Result<(CandidateOutcome, Option<ResultEntry>), FetchError> {
    let phone_number = backend.phone_number(&link.uri).await?;
    if phone_number.is_empty() {
        return Ok((CandidateOutcome::NoPhoneNumber, None));
    }

    if !backend.is_number_allowed(&phone_number).await? {
        return Ok((CandidateOutcome::Blacklisted, None));
    }

    if accepted
        .iter()
        .any(|entry| entry.phone_number() == phone_number)
    {
        return Ok((CandidateOutcome::Duplicate, None));
    }

    let name = contacts
        .iter()
        .find(|contact| contact.phone_number == phone_number)
        .and_then(|contact| contact.name.clone());

    let entry = ResultEntry {
        post_link: link.clone(),
        contact: Contact { name, phone_number },
    };
    Ok((CandidateOutcome::Accepted, Some(entry)))
}
