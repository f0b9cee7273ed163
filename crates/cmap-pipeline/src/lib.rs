//! CMAP Pipeline - Concept map orchestration
//!
//! Ties the stages together behind one context object:
//! - Coreference resolution of the input text
//! - Relation extraction into concept triples
//! - Optional ranking against a supporting PDF and top-N filtering
//! - Graph layout
//!
//! The language model is built once and shared read-only by every stage.
//!
//! Author: hephaex@gmail.com

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use cmap_core::{
    AppConfig, ConceptMapError, ConceptTriple, Graph, RankedConcept, Result, TokenScores,
};
use cmap_extractor::{RelationExtractor, TripleExtractor};
use cmap_graph::layout_triples;
use cmap_nlp::{CoreferenceResolver, LanguageModel, RuleBasedModel};
use cmap_ranker::ConceptRanker;

// ============================================================================
// Request / Response
// ============================================================================

/// One concept map batch: free text, a supporting document, or both
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptMapRequest {
    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<PathBuf>,
}

impl ConceptMapRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            document: None,
        }
    }

    pub fn with_document(mut self, path: impl Into<PathBuf>) -> Self {
        self.document = Some(path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.document.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMapResponse {
    pub success: bool,
    pub graph: Graph,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Concept map builder holding the shared language model and stage settings
pub struct ConceptMapPipeline {
    model: Arc<dyn LanguageModel>,
    resolver: CoreferenceResolver,
    extractor: Arc<dyn TripleExtractor>,
    ranker: ConceptRanker,
    config: AppConfig,
}

impl ConceptMapPipeline {
    /// Pipeline with the built-in rule-based model
    pub fn new(config: AppConfig) -> Self {
        let model = Arc::new(RuleBasedModel::from_config(&config.annotator));
        Self::with_model(model, config)
    }

    /// Pipeline around an already built language model
    pub fn with_model(model: Arc<dyn LanguageModel>, config: AppConfig) -> Self {
        Self {
            resolver: CoreferenceResolver::from_config(&config.coref),
            extractor: Arc::new(RelationExtractor::new()),
            ranker: ConceptRanker::new(Arc::clone(&model)),
            model,
            config,
        }
    }

    /// Replace the relation extractor
    pub fn with_extractor(mut self, extractor: Arc<dyn TripleExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Text with every resolvable pronoun replaced by its antecedent
    pub fn resolve_coreferences(&self, text: &str) -> Result<String> {
        let doc = self.model.annotate(text)?;
        Ok(self.resolver.resolve(&doc))
    }

    pub fn extract_concept_triples(&self, text: &str) -> Result<Vec<ConceptTriple>> {
        let doc = self.model.annotate(text)?;
        self.extractor.extract(&doc)
    }

    pub fn read_pdf_text(&self, path: impl AsRef<Path>) -> Result<String> {
        cmap_ranker::read_pdf_text(path)
    }

    pub fn rank_tokens(&self, text: &str) -> Result<TokenScores> {
        self.ranker.rank_tokens(text)
    }

    pub fn rank_concepts(
        &self,
        text: &str,
        token_scores: &TokenScores,
    ) -> Result<Vec<RankedConcept>> {
        self.ranker.rank_concepts(text, token_scores)
    }

    /// Concepts of a document ranked against its own token scores
    pub fn rank_document(&self, path: impl AsRef<Path>) -> Result<Vec<RankedConcept>> {
        self.ranker.rank_document(path)
    }

    pub fn filter_triples(
        &self,
        triples: &[ConceptTriple],
        ranked: &[RankedConcept],
        top_n: usize,
    ) -> Vec<ConceptTriple> {
        cmap_ranker::filter_triples(triples, ranked, top_n)
    }

    pub fn layout(&self, triples: &[ConceptTriple]) -> Graph {
        layout_triples(triples, &self.config.layout)
    }

    /// Run a full batch
    ///
    /// Text is resolved and mined for triples. With a document, the resolved
    /// text's concepts are ranked against the document's tokens and only
    /// triples between the top-ranked concepts are kept.
    pub fn build(&self, request: &ConceptMapRequest) -> Result<ConceptMapResponse> {
        if request.is_empty() {
            return Err(ConceptMapError::EmptyInput);
        }
        let start = Instant::now();

        let (resolved, mut triples) = if request.text.is_empty() {
            (String::new(), Vec::new())
        } else {
            let resolved = self.resolve_coreferences(&request.text)?;
            let triples = self.extract_concept_triples(&resolved)?;
            (resolved, triples)
        };
        debug!(triples = triples.len(), "Extracted concept triples");

        if let Some(path) = &request.document {
            let document_text = self.read_pdf_text(path)?;
            let token_scores = self.rank_tokens(&document_text)?;
            let ranked = self.rank_concepts(&resolved, &token_scores)?;
            triples = self.filter_triples(&triples, &ranked, self.config.ranking.top_n);
            debug!(
                ranked = ranked.len(),
                kept = triples.len(),
                "Filtered triples by document ranking"
            );
        }

        let graph = self.layout(&triples);
        info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Concept map built"
        );

        Ok(ConceptMapResponse {
            success: true,
            graph,
        })
    }
}

impl std::fmt::Debug for ConceptMapPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptMapPipeline")
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_empty() {
        assert!(ConceptMapRequest::default().is_empty());
        assert!(!ConceptMapRequest::text("The cat slept.").is_empty());
        assert!(!ConceptMapRequest::default().with_document("paper.pdf").is_empty());
    }

    #[test]
    fn test_request_deserializes_without_document() {
        let request: ConceptMapRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(request, ConceptMapRequest::text("hi"));
    }

    #[test]
    fn test_build_rejects_empty_request() {
        let pipeline = ConceptMapPipeline::new(AppConfig::default());
        let err = pipeline.build(&ConceptMapRequest::default()).unwrap_err();
        assert!(matches!(err, ConceptMapError::EmptyInput));
    }
}
