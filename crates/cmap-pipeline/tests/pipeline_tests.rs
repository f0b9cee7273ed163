//! End-to-end concept map scenarios

use std::io::Write;

use cmap_core::{AppConfig, ConceptMapError, ConceptTriple, LayoutConfig, RankedConcept};
use cmap_pipeline::{ConceptMapPipeline, ConceptMapRequest};
use tempfile::NamedTempFile;

/// Minimal PDF with one page per entry; an empty entry is a page without
/// content
fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        String::new(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    let mut kids = Vec::new();
    for text in pages {
        let page_id = objects.len() + 1;
        let content = if text.is_empty() {
            String::new()
        } else {
            format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET")
        };
        kids.push(format!("{page_id} 0 R"));
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            page_id + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }
    objects[1] = format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    );

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref = out.len();
    let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        tail.push_str(&format!("{offset:010} 00000 n \n"));
    }
    tail.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
        objects.len() + 1
    ));
    out.extend_from_slice(tail.as_bytes());
    out
}

fn pdf_file(pages: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&pdf_bytes(pages)).unwrap();
    file.flush().unwrap();
    file
}

fn seeded_pipeline() -> ConceptMapPipeline {
    let config = AppConfig {
        layout: LayoutConfig {
            seed: Some(17),
            ..LayoutConfig::default()
        },
        ..AppConfig::default()
    };
    ConceptMapPipeline::new(config)
}

#[test]
fn test_single_sentence_map() {
    let pipeline = seeded_pipeline();
    let triples = pipeline
        .extract_concept_triples("The cat chased the mouse.")
        .unwrap();
    assert_eq!(triples, vec![ConceptTriple::new("the cat", "chased", "the mouse")]);

    let graph = pipeline.layout(&triples);
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["the cat", "the mouse"]);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].id, "the cat-the mouse");
    assert_eq!(graph.edges[0].label, "chased");
}

#[test]
fn test_text_without_pronouns_is_unchanged() {
    let pipeline = seeded_pipeline();
    let text = "The cat chased the mouse. The dog slept.";
    assert_eq!(pipeline.resolve_coreferences(text).unwrap(), text);
}

#[test]
fn test_build_resolves_pronouns_before_extraction() {
    let pipeline = seeded_pipeline();
    let response = pipeline
        .build(&ConceptMapRequest::text(
            "The cat chased the mouse. It ate the cheese.",
        ))
        .unwrap();

    assert!(response.success);
    let graph = response.graph;
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["the cat", "the mouse", "the cheese"]);
    assert_eq!(graph.edge_between("the cat", "the cheese").unwrap().label, "ate");
    assert!(graph.node("it").is_none());
}

#[test]
fn test_build_is_deterministic_with_seed() {
    let pipeline = seeded_pipeline();
    let request = ConceptMapRequest::text("The cat that ate the cheese chased the mouse.");
    let first = pipeline.build(&request).unwrap();
    let second = pipeline.build(&request).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_build_without_relations_is_empty_graph() {
    let pipeline = seeded_pipeline();
    let response = pipeline.build(&ConceptMapRequest::text("Hello.")).unwrap();
    assert!(response.success);
    assert!(response.graph.is_empty());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({"success": true, "graph": {"nodes": [], "edges": []}}));
}

#[test]
fn test_build_requires_input() {
    let err = seeded_pipeline()
        .build(&ConceptMapRequest::default())
        .unwrap_err();
    assert!(matches!(err, ConceptMapError::EmptyInput));
}

#[test]
fn test_build_with_unreadable_document() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "plain text, not a pdf").unwrap();

    let request = ConceptMapRequest::text("The cat chased the mouse.").with_document(file.path());
    let err = seeded_pipeline().build(&request).unwrap_err();
    assert!(matches!(err, ConceptMapError::DocumentRead { .. }));
}

#[test]
fn test_rank_and_filter() {
    let pipeline = seeded_pipeline();
    let text = "The cat chased the mouse. The cat ate the cheese.";

    let token_scores = pipeline.rank_tokens(text).unwrap();
    let ranked = pipeline.rank_concepts(text, &token_scores).unwrap();
    assert_eq!(ranked[0].phrase, "the cat");

    let triples = pipeline.extract_concept_triples(text).unwrap();
    assert_eq!(triples.len(), 2);

    let kept = pipeline.filter_triples(&triples, &ranked, 2);
    assert_eq!(kept, vec![ConceptTriple::new("the cat", "chased", "the mouse")]);
}

#[test]
fn test_filter_scenario() {
    let pipeline = seeded_pipeline();
    let triples = vec![ConceptTriple::new("a", "r", "b"), ConceptTriple::new("c", "r2", "d")];
    let ranked = vec![RankedConcept::new("a", 0.9), RankedConcept::new("b", 0.5)];

    assert_eq!(
        pipeline.filter_triples(&triples, &ranked, 2),
        vec![ConceptTriple::new("a", "r", "b")]
    );
}

#[test]
fn test_empty_text_ranks_nothing() {
    let pipeline = seeded_pipeline();
    assert!(pipeline.rank_tokens("").unwrap().is_empty());
    assert!(pipeline.layout(&[]).is_empty());
}

#[test]
fn test_annotation_limit_is_configurable() {
    let mut config = AppConfig::default();
    config.annotator.max_length = 10;
    let pipeline = ConceptMapPipeline::new(config);

    let err = pipeline
        .extract_concept_triples("The cat chased the mouse.")
        .unwrap_err();
    assert!(matches!(err, ConceptMapError::Annotation(_)));
}

#[test]
fn test_text_free_documents_rank_nothing() {
    let pipeline = seeded_pipeline();
    for pages in [&[][..], &[""][..]] {
        let file = pdf_file(pages);
        let text = pipeline.read_pdf_text(file.path()).unwrap();
        assert_eq!(text, "");
        assert!(pipeline.rank_tokens(&text).unwrap().is_empty());
        assert!(pipeline.rank_document(file.path()).unwrap().is_empty());
    }
}

#[test]
fn test_read_document_text() {
    let file = pdf_file(&["The cat chased the mouse."]);
    let text = seeded_pipeline().read_pdf_text(file.path()).unwrap();
    assert!(text.contains("The cat chased the mouse."));
}

#[test]
fn test_build_filters_by_document_ranking() {
    let mut config = AppConfig::default();
    config.layout.seed = Some(17);
    config.ranking.top_n = 2;
    let pipeline = ConceptMapPipeline::new(config);

    let text = "The cat chased the mouse. The dog chased the ball.";
    assert_eq!(pipeline.extract_concept_triples(text).unwrap().len(), 2);

    let file = pdf_file(&["The cat chased the mouse."]);
    let response = pipeline
        .build(&ConceptMapRequest::text(text).with_document(file.path()))
        .unwrap();

    let ids: Vec<&str> = response.graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["the cat", "the mouse"]);
    assert_eq!(response.graph.edges.len(), 1);
    assert_eq!(response.graph.edges[0].label, "chased");
}

#[test]
fn test_build_with_text_free_document_keeps_zero_scored_concepts() {
    let file = pdf_file(&[""]);
    let response = seeded_pipeline()
        .build(&ConceptMapRequest::text("The cat chased the mouse.").with_document(file.path()))
        .unwrap();
    assert!(response.success);
    // every concept scores 0, but the top-N allow-set still admits them
    assert_eq!(response.graph.nodes.len(), 2);
}
