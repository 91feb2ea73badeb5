use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::engine::core::chunk::ChunkDescriptor;
use crate::engine::errors::FetchError;
use crate::engine::fetch::ChunkFetcher;

/// Fetcher that serves fixed bodies by URL, optionally failing first.
pub struct ScriptedFetcher {
    bodies: HashMap<String, Vec<u8>>,
    failures: Mutex<HashMap<String, VecDeque<FetchFailure>>>,
    calls: AtomicUsize,
}

#[derive(Clone)]
pub enum FetchFailure {
    Transient,
    Fatal,
    /// Serves this body instead of the real one, e.g. a truncated download.
    Corrupt(Vec<u8>),
}

pub struct FetcherFactory {
    bodies: HashMap<String, Vec<u8>>,
    failures: HashMap<String, VecDeque<FetchFailure>>,
}

impl FetcherFactory {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    pub fn with_failure(mut self, url: &str, failure: FetchFailure) -> Self {
        self.failures
            .entry(url.into())
            .or_default()
            .push_back(failure);
        self
    }

    pub fn create(self) -> ScriptedFetcher {
        ScriptedFetcher {
            bodies: self.bodies,
            failures: Mutex::new(self.failures),
            calls: AtomicUsize::new(0),
        }
    }
}

impl ScriptedFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChunkFetcher for ScriptedFetcher {
    fn fetch(&self, descriptor: &ChunkDescriptor) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next_failure = self
            .failures
            .lock()
            .get_mut(&descriptor.url)
            .and_then(VecDeque::pop_front);
        match next_failure {
            Some(FetchFailure::Transient) => {
                Err(FetchError::Transient(format!("timeout on {}", descriptor.url)))
            }
            Some(FetchFailure::Fatal) => Err(FetchError::Fatal(format!("403 on {}", descriptor.url))),
            Some(FetchFailure::Corrupt(body)) => Ok(body),
            None => self
                .bodies
                .get(&descriptor.url)
                .cloned()
                .ok_or_else(|| FetchError::Fatal(format!("404 on {}", descriptor.url))),
        }
    }
}
