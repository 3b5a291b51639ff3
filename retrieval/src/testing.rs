//! Shared mock collaborators for pipeline tests.
//!
//! No live service is touched in tests; every seam trait has a counting
//! mock here so call-count assertions stay cheap.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use vector_store::{EmbeddingsProvider, SearchResult, TagFilter, VectorStoreError};

use crate::error::RetrievalError;
use crate::llm::Completion;
use crate::sources::{DocumentQuery, VectorSearcher};

/// Counting completion mock with scripted responses.
pub struct MockCompletion {
    responses: Mutex<VecDeque<String>>,
    fallback: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockCompletion {
    /// Always returns `response`.
    pub fn returning(response: &str) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: response.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns scripted responses in order, then the last one repeatedly.
    pub fn sequence(responses: &[&str]) -> Self {
        let fallback = responses.last().map(|s| s.to_string()).unwrap_or_default();
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            fallback,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every call.
    pub fn failing() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completed calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Completion for MockCompletion {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, RetrievalError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RetrievalError::MalformedResponse("mock failure".into()));
            }
            let next = self.responses.lock().unwrap().pop_front();
            Ok(next.unwrap_or_else(|| self.fallback.clone()))
        })
    }
}

/// Counting vector-search mock.
///
/// `filtered` serves filtered calls, `unfiltered` the fallback calls.
pub struct MockSearcher {
    pub filtered: Vec<SearchResult>,
    pub unfiltered: Vec<SearchResult>,
    filtered_calls: AtomicUsize,
    unfiltered_calls: AtomicUsize,
}

impl MockSearcher {
    pub fn new(filtered: Vec<SearchResult>, unfiltered: Vec<SearchResult>) -> Self {
        Self {
            filtered,
            unfiltered,
            filtered_calls: AtomicUsize::new(0),
            unfiltered_calls: AtomicUsize::new(0),
        }
    }

    pub fn filtered_calls(&self) -> usize {
        self.filtered_calls.load(Ordering::SeqCst)
    }

    pub fn unfiltered_calls(&self) -> usize {
        self.unfiltered_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.filtered_calls() + self.unfiltered_calls()
    }
}

impl VectorSearcher for MockSearcher {
    fn search<'a>(
        &'a self,
        _query_text: &'a str,
        _limit: u64,
        filter: Option<&'a TagFilter>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, RetrievalError>> + Send + 'a>> {
        Box::pin(async move {
            if filter.is_some() {
                self.filtered_calls.fetch_add(1, Ordering::SeqCst);
                Ok(self.filtered.clone())
            } else {
                self.unfiltered_calls.fetch_add(1, Ordering::SeqCst);
                Ok(self.unfiltered.clone())
            }
        })
    }
}

/// Counting document-query mock.
pub struct MockDocuments {
    pub results: Vec<SearchResult>,
    calls: AtomicUsize,
}

impl MockDocuments {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentQuery for MockDocuments {
    fn execute<'a>(
        &'a self,
        _query: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, RetrievalError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        })
    }
}

/// Deterministic embedder driven by a plain function.
pub struct MockEmbedder {
    embed_fn: fn(&str) -> Vec<f32>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new(embed_fn: fn(&str) -> Vec<f32>) -> Self {
        Self {
            embed_fn,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            embed_fn: |_| Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingsProvider for MockEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, VectorStoreError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(VectorStoreError::Qdrant("mock embedder failure".into()));
            }
            Ok((self.embed_fn)(text))
        })
    }

    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, VectorStoreError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(VectorStoreError::Qdrant("mock embedder failure".into()));
            }
            Ok(texts.iter().map(|t| (self.embed_fn)(t)).collect())
        })
    }
}

/// Builds a bare search result with the given text and score.
pub fn result(text: &str, score: Option<f32>) -> SearchResult {
    SearchResult::new(text, serde_json::Map::new(), score)
}
