//! Drives the fetch-and-normalize sequence for a set number.
//!
//! The state machine is `Idle -> Searching -> Idle (new set | error)`. The fetch
//! is the only suspension point; no timeout is imposed here, the fetcher owns
//! timeouts and retries.

use std::fmt;

use reqwest::StatusCode;

use crate::{
    management::{Action, Session, StorageSlot},
    normalize,
    types::FetchedSet,
    utils, warning,
};

/// The one message a user ever sees for a failed search.
pub const SEARCH_FAILED_MESSAGE: &str = "Set not found or connection error.";

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Status(StatusCode),
    EmptyResponse,
    Malformed(serde_json::Error),
    Config(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "request failed: {}", e),
            FetchError::Status(s) => write!(f, "service answered with {}", s),
            FetchError::EmptyResponse => write!(f, "service returned no payload"),
            FetchError::Malformed(e) => write!(f, "malformed payload: {}", e),
            FetchError::Config(e) => write!(f, "fetcher not configured: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

/// Retrieves the raw part list of a set from some external source.
#[allow(async_fn_in_trait)]
pub trait SetFetcher {
    async fn fetch(&self, set_number: &str) -> Result<FetchedSet, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The new set was added and is now active.
    Added(String),
    Failed,
    /// A search was already in flight, this one was dropped.
    AlreadySearching,
}

pub async fn search<S, F>(session: &mut Session<S>, fetcher: &F, set_number: &str) -> SearchOutcome
where
    S: StorageSlot,
    F: SetFetcher,
{
    if session.state().is_searching {
        return SearchOutcome::AlreadySearching;
    }

    let set_number = set_number.trim();
    session.dispatch(Action::BeginSearch).await;

    match fetcher.fetch(set_number).await {
        Ok(fetched) => {
            let set = normalize::normalize_set(fetched, set_number, utils::now_millis());
            let set_id = set.id.clone();
            session.dispatch(Action::AddSet(set)).await;
            SearchOutcome::Added(set_id)
        }
        Err(e) => {
            warning!("Search for set {} failed. Err: {}", set_number, e);
            session
                .dispatch(Action::SearchFailed(SEARCH_FAILED_MESSAGE.to_string()))
                .await;
            SearchOutcome::Failed
        }
    }
}
