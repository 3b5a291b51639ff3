//! The retrieval orchestrator.
//!
//! Linear state machine per request:
//! normalize → intent (may short-circuit to the document store) → tag →
//! self-query merge → tag filter → expand → per-variant search (with
//! unfiltered fallback) → de-duplicate → rerank.
//!
//! Per-variant searches are independent and fan out concurrently; results
//! merge in variant order with first-occurrence-wins de-duplication. Any
//! uncaught step failure degrades to an empty result list instead of
//! surfacing to the API layer.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future;
use tracing::{debug, error, info, warn};
use transcript_prep::{financial_keywords, tag_text};
use vector_store::{EmbeddingsProvider, SearchResult, TagFilter};

use crate::cfg::RetrievalConfig;
use crate::error::RetrievalError;
use crate::expansion::QueryExpansion;
use crate::intent::IntentDetector;
use crate::llm::Completion;
use crate::query::{Query, QueryIntent};
use crate::rerank::Reranker;
use crate::self_query::{SelfQuery, extracted_terms};
use crate::sources::{DocumentQuery, VectorSearcher};

/// Coordinates every retrieval step behind one entry point.
///
/// Collaborators are injected at construction; no global state is touched,
/// so independent requests can run on separate tasks.
pub struct RetrievalPipeline {
    cfg: RetrievalConfig,
    intent: IntentDetector,
    expander: QueryExpansion,
    self_query: SelfQuery,
    reranker: Reranker,
    searcher: Arc<dyn VectorSearcher>,
    documents: Arc<dyn DocumentQuery>,
}

impl RetrievalPipeline {
    /// Builds a pipeline from configuration and injected collaborators.
    ///
    /// # Errors
    /// Returns [`RetrievalError::InvalidArgument`] for invalid config.
    pub fn new(
        cfg: RetrievalConfig,
        completion: Arc<dyn Completion>,
        embedder: Arc<dyn EmbeddingsProvider>,
        searcher: Arc<dyn VectorSearcher>,
        documents: Arc<dyn DocumentQuery>,
    ) -> Result<Self, RetrievalError> {
        cfg.validate()?;

        Ok(Self {
            intent: IntentDetector::new(completion.clone(), cfg.mock),
            expander: QueryExpansion::new(completion.clone(), cfg.mock),
            self_query: SelfQuery::new(completion, cfg.mock),
            reranker: Reranker::new(embedder, cfg.mock),
            searcher,
            documents,
            cfg,
        })
    }

    /// Returns the pipeline configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.cfg
    }

    /// Retrieves ranked context for a raw query string.
    ///
    /// Never fails: any step error is logged and converted to an empty
    /// result list so retrieval degrades gracefully.
    pub async fn retrieve(&self, raw_query: &str) -> Vec<SearchResult> {
        info!(query = %raw_query, "retrieving context");
        match self.try_retrieve(raw_query).await {
            Ok(results) => {
                info!(count = results.len(), "retrieval completed");
                results
            }
            Err(e) => {
                error!(error = %e, "retrieval failed; returning empty results");
                Vec::new()
            }
        }
    }

    async fn try_retrieve(&self, raw_query: &str) -> Result<Vec<SearchResult>, RetrievalError> {
        // 1. Normalize the input into a query value.
        let query = Query::from_str(raw_query);

        // 2. Detect intent; misdetection must never block retrieval, so the
        //    error branch maps to GENERAL right here.
        let (intent, structured) = match self.intent.try_detect(&query).await {
            Ok(detected) => detected,
            Err(e) => {
                error!(error = %e, "intent detection failed; defaulting to GENERAL");
                (QueryIntent::General, None)
            }
        };

        if intent != QueryIntent::General {
            if let Some(payload) = structured {
                debug!(?intent, "executing structured query; vector search bypassed");
                return self.documents.execute(&payload).await;
            }
            warn!(?intent, "intent without structured query; using vector search");
        }

        // 3. Seed candidate tags from the query content.
        let mut tags = tag_text(&query.content, &financial_keywords());

        // 4. Merge self-query terms; extraction failure degrades to no-op.
        let extracted = match self.self_query.try_extract(&query).await {
            Ok(augmented) => augmented,
            Err(e) => {
                error!(error = %e, "self-query failed; continuing without extracted terms");
                query.clone()
            }
        };
        for term in extracted_terms(&extracted) {
            if !tags.contains(&term) {
                tags.push(term);
            }
        }

        // 5. Build the tag filter; an empty tag set means no filter.
        let filter = TagFilter::from_tags(tags);
        debug!(filtered = filter.is_some(), "built tag filter");

        // 6. Expand the query into variants.
        let expanded = self.expander.expand(&query, self.cfg.expand_to_n).await?;
        info!(variants = expanded.len(), "expanded query");

        // 7. Fan out one search per variant; a filtered search that comes
        //    back empty retries once without the filter.
        let searches = expanded.iter().map(|variant| {
            let filter = filter.as_ref();
            async move {
                let hits = self
                    .searcher
                    .search(&variant.content, self.cfg.search_limit, filter)
                    .await?;
                if hits.is_empty() && filter.is_some() {
                    debug!(variant = %variant.content, "filtered search empty; retrying unfiltered");
                    return self
                        .searcher
                        .search(&variant.content, self.cfg.search_limit, None)
                        .await;
                }
                Ok(hits)
            }
        });
        let per_variant = future::join_all(searches).await;

        // 8. De-duplicate by exact text; first occurrence wins in variant order.
        let mut seen: HashSet<String> = HashSet::new();
        let mut pool: Vec<SearchResult> = Vec::new();
        for hits in per_variant {
            for hit in hits? {
                if seen.insert(hit.text.clone()) {
                    pool.push(hit);
                }
            }
        }

        // 9. Nothing found anywhere: terminal empty result.
        if pool.is_empty() {
            warn!("no results found from vector search");
            return Ok(Vec::new());
        }

        // 10. Rerank against the original (pre-expansion) query; rerank
        //     failure degrades to the unranked head of the pool.
        match self
            .reranker
            .rerank(&query, pool.clone(), self.cfg.top_k)
            .await
        {
            Ok(ranked) => Ok(ranked),
            Err(e) => {
                error!(error = %e, "reranking failed; returning unranked head");
                pool.truncate(self.cfg.top_k);
                Ok(pool)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCompletion, MockDocuments, MockEmbedder, MockSearcher, result};

    const GENERAL_INTENT: &str =
        r#"{"intent": "GENERAL", "reasoning": "content question", "mongo_query": null}"#;

    fn axis_embed(text: &str) -> Vec<f32> {
        if text.to_lowercase().contains("revenue") {
            vec![1.0, 0.1]
        } else {
            vec![0.1, 1.0]
        }
    }

    fn pipeline(
        cfg: RetrievalConfig,
        completion: Arc<MockCompletion>,
        searcher: Arc<MockSearcher>,
        documents: Arc<MockDocuments>,
    ) -> RetrievalPipeline {
        RetrievalPipeline::new(
            cfg,
            completion,
            Arc::new(MockEmbedder::new(axis_embed)),
            searcher,
            documents,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn reranks_revenue_chunk_to_the_top() {
        // Calls arrive in step order: intent, self-query, expansion.
        let completion = Arc::new(MockCompletion::sequence(&[
            GENERAL_INTENT,
            "revenue, guidance",
            "What revenue outlook was shared?#next-question#What did management project for sales?",
        ]));
        let searcher = Arc::new(MockSearcher::new(
            vec![
                result("Headquarters moved to Austin.", Some(0.1)),
                result("Revenue guidance for Q3 is $50M.", Some(0.9)),
            ],
            Vec::new(),
        ));
        let documents = Arc::new(MockDocuments::new(Vec::new()));

        let p = pipeline(
            RetrievalConfig::default(),
            completion,
            searcher,
            documents,
        );
        let out = p.retrieve("What was revenue guidance for next quarter?").await;

        assert!(!out.is_empty());
        assert_eq!(out[0].text, "Revenue guidance for Q3 is $50M.");
    }

    #[tokio::test]
    async fn metadata_intent_bypasses_vector_search() {
        let completion = Arc::new(MockCompletion::returning(
            r#"{"intent": "METADATA", "reasoning": "count", "mongo_query": {"metadata.type": "earnings_call", "$count": "document_count"}}"#,
        ));
        let searcher = Arc::new(MockSearcher::new(Vec::new(), Vec::new()));
        let documents = Arc::new(MockDocuments::new(vec![result(
            "Found 42 matching documents.",
            None,
        )]));

        let p = pipeline(
            RetrievalConfig::default(),
            completion.clone(),
            searcher.clone(),
            documents.clone(),
        );
        let out = p.retrieve("How many earnings call transcripts are stored?").await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Found 42 matching documents.");
        assert_eq!(documents.calls(), 1);
        // Vector search never ran; neither did self-query/expansion.
        assert_eq!(searcher.total_calls(), 0);
        assert_eq!(completion.calls(), 1);
    }

    #[tokio::test]
    async fn duplicate_texts_across_variants_collapse() {
        let completion = Arc::new(MockCompletion::sequence(&[
            GENERAL_INTENT,
            "revenue",
            "Variant two?#next-question#Variant three?",
        ]));
        // Every variant surfaces the same text; the pool keeps one copy.
        let searcher = Arc::new(MockSearcher::new(
            vec![
                result("Q3 revenue was strong.", Some(0.8)),
                result("Margins expanded.", Some(0.5)),
            ],
            Vec::new(),
        ));
        let documents = Arc::new(MockDocuments::new(Vec::new()));

        let p = pipeline(
            RetrievalConfig::default(),
            completion,
            searcher.clone(),
            documents,
        );
        let out = p.retrieve("How did revenue develop?").await;

        assert_eq!(searcher.filtered_calls(), 3);
        let dup_count = out
            .iter()
            .filter(|r| r.text == "Q3 revenue was strong.")
            .count();
        assert_eq!(dup_count, 1);
    }

    #[tokio::test]
    async fn empty_filtered_search_retries_unfiltered() {
        let completion = Arc::new(MockCompletion::sequence(&[
            GENERAL_INTENT,
            "revenue, guidance",
            "",
        ]));
        let searcher = Arc::new(MockSearcher::new(
            Vec::new(),
            vec![result("Revenue guidance was raised.", Some(0.7))],
        ));
        let documents = Arc::new(MockDocuments::new(Vec::new()));

        let cfg = RetrievalConfig {
            expand_to_n: 1,
            ..Default::default()
        };
        let p = pipeline(cfg, completion, searcher.clone(), documents);
        let out = p.retrieve("What was revenue guidance?").await;

        // One filtered attempt, then exactly one unfiltered retry.
        assert_eq!(searcher.filtered_calls(), 1);
        assert_eq!(searcher.unfiltered_calls(), 1);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Revenue guidance was raised.");
    }

    #[tokio::test]
    async fn queries_without_tags_search_unfiltered() {
        let completion = Arc::new(MockCompletion::sequence(&[
            GENERAL_INTENT,
            "none",
            "",
        ]));
        let searcher = Arc::new(MockSearcher::new(
            Vec::new(),
            vec![result("Something relevant.", Some(0.4))],
        ));
        let documents = Arc::new(MockDocuments::new(Vec::new()));

        let cfg = RetrievalConfig {
            expand_to_n: 1,
            ..Default::default()
        };
        let p = pipeline(cfg, completion, searcher.clone(), documents);
        let out = p.retrieve("Tell me something interesting.").await;

        assert_eq!(searcher.filtered_calls(), 0);
        assert_eq!(searcher.unfiltered_calls(), 1);
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn empty_pool_returns_empty_results() {
        let completion = Arc::new(MockCompletion::sequence(&[GENERAL_INTENT, "none", ""]));
        let searcher = Arc::new(MockSearcher::new(Vec::new(), Vec::new()));
        let documents = Arc::new(MockDocuments::new(Vec::new()));

        let p = pipeline(
            RetrievalConfig::default(),
            completion,
            searcher,
            documents,
        );
        assert!(p.retrieve("Anything at all?").await.is_empty());
    }

    #[tokio::test]
    async fn total_service_failure_degrades_to_empty() {
        // Intent and self-query fall back individually; expansion's failure
        // is the uncaught step that converts to an empty result list.
        let completion = Arc::new(MockCompletion::failing());
        let searcher = Arc::new(MockSearcher::new(
            vec![result("unreachable", None)],
            Vec::new(),
        ));
        let documents = Arc::new(MockDocuments::new(Vec::new()));

        let p = pipeline(
            RetrievalConfig::default(),
            completion,
            searcher.clone(),
            documents,
        );
        let out = p.retrieve("What was revenue guidance?").await;

        assert!(out.is_empty());
        assert_eq!(searcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn mock_mode_never_touches_the_completion_service() {
        let completion = Arc::new(MockCompletion::returning("unused"));
        let searcher = Arc::new(MockSearcher::new(
            Vec::new(),
            vec![result("Revenue was strong.", Some(0.9))],
        ));
        let documents = Arc::new(MockDocuments::new(Vec::new()));

        let cfg = RetrievalConfig {
            mock: true,
            ..Default::default()
        };
        let p = pipeline(cfg, completion.clone(), searcher.clone(), documents);
        let out = p.retrieve("Tell me a thing.").await;

        assert_eq!(completion.calls(), 0);
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let completion = Arc::new(MockCompletion::returning("unused"));
        let cfg = RetrievalConfig {
            expand_to_n: 0,
            ..Default::default()
        };
        let err = RetrievalPipeline::new(
            cfg,
            completion,
            Arc::new(MockEmbedder::new(axis_embed)),
            Arc::new(MockSearcher::new(Vec::new(), Vec::new())),
            Arc::new(MockDocuments::new(Vec::new())),
        )
        .err()
        .unwrap();
        assert!(matches!(err, RetrievalError::InvalidArgument(_)));
    }
}
