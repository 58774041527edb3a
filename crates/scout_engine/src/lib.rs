//! Scout engine: backend HTTP client, scrape loop and local storage.
mod backend;
mod delay;
mod persist;
mod scrape;
mod storage;
mod types;

pub use backend::{Backend, BackendSettings, HttpBackend};
pub use delay::{Delay, FixedDelay, NoDelay, MIN_REQUEST_DELAY};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use scrape::{run_scrape, ProgressSink};
pub use storage::{encode_item, LocalStorage, StorageError, STORAGE_FILENAME};
pub use types::{
    CandidateOutcome, FailureKind, FetchError, ScrapeError, ScrapeEvent, ScrapeSummary,
};
