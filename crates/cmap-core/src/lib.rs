//! CMAP Core - Domain models, errors, and shared types
//!
//! This crate defines the core abstractions used throughout the concept map
//! pipeline:
//! - Annotation spans (noun phrases, verb phrases)
//! - Candidate links and concept triples
//! - Ranked concepts and token scores
//! - The positioned graph handed to renderers
//! - Common error types
//! - Configuration management
//!
//! Author: hephaex@gmail.com

pub mod config;

pub use config::{
    AnnotatorConfig, AppConfig, ConfigError, CorefConfig, LayoutConfig, LoggingConfig,
    RankingConfig,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for concept map operations
#[derive(Error, Debug)]
pub enum ConceptMapError {
    /// The language model could not annotate the input
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// The supporting document could not be read
    #[error("Failed to read document {path}: {reason}")]
    DocumentRead { path: String, reason: String },

    /// Neither text nor a document was supplied
    #[error("Nothing to process: no text and no document supplied")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ConceptMapError>;

// ============================================================================
// Spans
// ============================================================================

/// A contiguous token range `[start, end)` within an annotated document
///
/// Token indices are document-level, so spans from different sentences of
/// the same document never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Span {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Number of tokens covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the two spans share at least one token position
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// True when `other` lies entirely inside this span
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True when this span lies in the gap between `left` and `right`
    ///
    /// The gap is closed at both ends: a span may start exactly where `left`
    /// ends and end exactly where `right` starts.
    pub fn lies_between(&self, left: &Span, right: &Span) -> bool {
        left.end <= self.start && self.end <= right.start
    }
}

/// A span tagged as a candidate concept, with lower-cased text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NounPhrase {
    pub span: Span,
}

impl NounPhrase {
    pub fn new(start: usize, end: usize, text: &str) -> Self {
        Self {
            span: Span::new(start, end, text.to_lowercase()),
        }
    }

    pub fn text(&self) -> &str {
        &self.span.text
    }
}

/// A span matching the verb-phrase pattern, with its surface text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbPhrase {
    pub span: Span,
}

impl VerbPhrase {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            span: Span::new(start, end, text),
        }
    }

    pub fn text(&self) -> &str {
        &self.span.text
    }
}

// ============================================================================
// Links and Triples
// ============================================================================

/// An unresolved subject/object noun phrase pair with every verb phrase
/// lying strictly between them in the same sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub subject: NounPhrase,
    pub object: NounPhrase,
    pub verb_phrases: Vec<VerbPhrase>,
}

impl CandidateLink {
    /// A link is unambiguous when exactly one verb phrase separates the pair
    pub fn is_unambiguous(&self) -> bool {
        self.verb_phrases.len() == 1
    }
}

/// The atomic unit of a concept map: (concept1, relation, concept2)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptTriple {
    pub concept1: String,
    pub relation: String,
    pub concept2: String,
}

impl ConceptTriple {
    pub fn new(
        concept1: impl Into<String>,
        relation: impl Into<String>,
        concept2: impl Into<String>,
    ) -> Self {
        Self {
            concept1: concept1.into(),
            relation: relation.into(),
            concept2: concept2.into(),
        }
    }
}

impl std::fmt::Display for ConceptTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} -[{}]-> {})", self.concept1, self.relation, self.concept2)
    }
}

// ============================================================================
// Ranking
// ============================================================================

/// Salience score per lemma
pub type TokenScores = BTreeMap<String, f64>;

/// A candidate concept phrase with its salience score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedConcept {
    pub phrase: String,
    pub score: f64,
}

impl RankedConcept {
    pub fn new(phrase: impl Into<String>, score: f64) -> Self {
        Self {
            phrase: phrase.into(),
            score,
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// 2D coordinate of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Display payload of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
}

/// A positioned concept node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub data: NodeData,
    pub position: Position,
}

impl GraphNode {
    pub fn new(concept: impl Into<String>, position: Position) -> Self {
        let id = concept.into();
        Self {
            data: NodeData { label: id.clone() },
            id,
            position,
        }
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }
}

/// A labeled edge between two concept nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub animated: bool,
}

impl GraphEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{source}-{target}"),
            source,
            target,
            label: label.into(),
            animated: true,
        }
    }
}

/// A positioned node/edge graph ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edge between two concepts, in either direction
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&GraphEdge> {
        self.edges
            .iter()
            .find(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
    }
}

// ============================================================================
// Tests
// ============================================================================
