//! Integration tests for the extraction pipeline

#[cfg(test)]
mod tests {
    use crate::{
        segment, ExtractError, ExtractionRequest, Extractor, ExtractorConfig, CELL_WIDTH,
        GRID_ORIGIN_X, GRID_ORIGIN_Y,
    };
    use plotboard_domain::{BoardPosition, BookType, SectionLinks};
    use plotboard_llm::MockGenerator;
    use tokio_util::sync::CancellationToken;

    const THREE_DRAFTS: &str = r#"[
        {"type": "scene", "name": "Docking", "description": "The ferry arrives", "sections": [1]},
        {"type": "character", "name": "Mara", "description": "Harbor master", "sections": [1, 2]},
        {"type": "location", "name": "The Harbor", "description": "A fog-bound port", "sections": [2]}
    ]"#;

    fn request(markdown: &str, book_type: BookType) -> ExtractionRequest {
        ExtractionRequest {
            sections: segment(markdown).sections,
            book_type,
        }
    }

    fn seven_section_manuscript() -> String {
        let mut text = String::from("# Long Book\n\n");
        for i in 1..=7 {
            text.push_str(&format!("## Chapter {}\n{}\n\n", i, "prose ".repeat(40)));
        }
        text
    }

    #[tokio::test]
    async fn test_single_request_happy_path() {
        let generator = MockGenerator::new(THREE_DRAFTS);
        let handle = generator.clone();
        let extractor = Extractor::new(generator, ExtractorConfig::default());

        let report = extractor
            .run(request("# Book\n\n## One\nFerry text.\n\n## Two\nHarbor text.", BookType::Novel))
            .await
            .unwrap();

        assert_eq!(handle.call_count(), 1);
        assert_eq!(report.chunks_attempted, 1);
        assert_eq!(report.chunks_failed, 0);
        assert!(!report.fell_back_to_chunks);

        // Three entities on the first grid row
        assert_eq!(report.entities.len(), 3);
        assert_eq!(report.entities[0].position, BoardPosition::new(GRID_ORIGIN_X, GRID_ORIGIN_Y));
        assert_eq!(
            report.entities[1].position,
            BoardPosition::new(GRID_ORIGIN_X + CELL_WIDTH, GRID_ORIGIN_Y)
        );
        assert_eq!(
            report.entities[2].position,
            BoardPosition::new(GRID_ORIGIN_X + 2.0 * CELL_WIDTH, GRID_ORIGIN_Y)
        );

        // Kind priority: scene before character before location
        assert_eq!(report.entities[0].name, "Docking");
        assert_eq!(report.entities[1].name, "Mara");
        assert_eq!(report.entities[2].name, "The Harbor");
    }

    #[tokio::test]
    async fn test_oversized_manuscript_chunks_in_order() {
        let generator = MockGenerator::new("[]");
        let handle = generator.clone();

        let config = ExtractorConfig {
            size_threshold_chars: 100,
            chunk_group_size: 3,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(generator, config);

        let result = extractor
            .run(request(&seven_section_manuscript(), BookType::Novel))
            .await;

        // Empty drafts everywhere -> EmptyResult, but all three calls happened
        assert!(matches!(result, Err(ExtractError::EmptyResult)));
        assert_eq!(handle.call_count(), 3);

        let prompts = handle.prompts();
        assert!(prompts[0].contains("numbered 1 through 3"));
        assert!(prompts[1].contains("numbered 4 through 6"));
        assert!(prompts[2].contains("numbered 7 through 7"));
        assert!(prompts[0].contains("Section 1: Chapter 1"));
        assert!(prompts[2].contains("Section 7: Chapter 7"));
    }

    #[tokio::test]
    async fn test_truncated_single_request_falls_back_to_chunks() {
        let generator = MockGenerator::default();
        // First call: cut short. The partial result must be discarded, not
        // merged with the chunked results.
        generator.push_truncated(r#"[{"type": "scene", "name": "Partial", "sections": [1]},"#);
        generator.push_response(r#"[{"type": "scene", "name": "From chunk 1", "sections": [1]}]"#);
        generator.push_response(r#"[{"type": "scene", "name": "From chunk 2", "sections": [2]}]"#);
        let handle = generator.clone();

        let config = ExtractorConfig {
            chunk_group_size: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(generator, config);

        let report = extractor
            .run(request("## One\ntext one\n\n## Two\ntext two", BookType::Novel))
            .await
            .unwrap();

        assert!(report.fell_back_to_chunks);
        assert_eq!(handle.call_count(), 3);
        assert_eq!(report.chunks_attempted, 3);
        assert_eq!(report.entities.len(), 2);
        assert!(report.entities.iter().all(|e| e.name != "Partial"));
    }

    #[tokio::test]
    async fn test_unsalvageable_truncated_single_request_still_falls_back() {
        let generator = MockGenerator::default();
        // Cut short with no complete record to salvage; the truncation flag
        // must still reach the orchestrator and trigger the chunked path.
        generator.push_truncated(r#"[{"type": "scene", "na"#);
        generator.push_response(r#"[{"type": "scene", "name": "From chunk 1", "sections": [1]}]"#);
        generator.push_response(r#"[{"type": "scene", "name": "From chunk 2", "sections": [2]}]"#);
        let handle = generator.clone();

        let config = ExtractorConfig {
            chunk_group_size: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(generator, config);

        let report = extractor
            .run(request("## One\ntext one\n\n## Two\ntext two", BookType::Novel))
            .await
            .unwrap();

        assert!(report.fell_back_to_chunks);
        assert_eq!(handle.call_count(), 3);
        assert_eq!(report.chunks_attempted, 3);
        assert_eq!(report.entities.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_chunk_is_skipped_and_run_continues() {
        let generator = MockGenerator::default();
        generator.push_error("connection reset");
        generator.push_response(r#"[{"type": "character", "name": "Survivor", "sections": [2]}]"#);
        let handle = generator.clone();

        let config = ExtractorConfig {
            size_threshold_chars: 10,
            chunk_group_size: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(generator, config);

        let report = extractor
            .run(request("## One\nfirst text\n\n## Two\nsecond text", BookType::Novel))
            .await
            .unwrap();

        assert_eq!(handle.call_count(), 2);
        assert_eq!(report.chunks_failed, 1);
        assert_eq!(report.entities.len(), 1);
        assert_eq!(report.entities[0].name, "Survivor");

        let rendered = report.log.render();
        assert!(rendered.contains("skipped"));
        assert!(rendered.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_all_chunks_failing_is_empty_result() {
        let generator = MockGenerator::default();
        generator.push_error("down");
        generator.push_error("still down");

        let config = ExtractorConfig {
            size_threshold_chars: 10,
            chunk_group_size: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(generator, config);

        let result = extractor
            .run(request("## One\naaa\n\n## Two\nbbb", BookType::Novel))
            .await;
        assert!(matches!(result, Err(ExtractError::EmptyResult)));
    }

    #[tokio::test]
    async fn test_empty_manuscript_fails_preflight() {
        let generator = MockGenerator::new(THREE_DRAFTS);
        let handle = generator.clone();
        let extractor = Extractor::new(generator, ExtractorConfig::default());

        let result = extractor.run(request("just prose, no headers", BookType::Novel)).await;
        assert!(matches!(result, Err(ExtractError::Configuration(_))));
        // Preflight failures never reach the service
        assert_eq!(handle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cancellation_stops_before_any_call() {
        let generator = MockGenerator::new(THREE_DRAFTS);
        let handle = generator.clone();

        let token = CancellationToken::new();
        token.cancel();
        let extractor =
            Extractor::new(generator, ExtractorConfig::default()).with_cancellation(token);

        let result = extractor.run(request("## One\ntext", BookType::Novel)).await;
        assert!(matches!(result, Err(ExtractError::Cancelled)));
        assert_eq!(handle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_novel_mode_merges_across_chunks_end_to_end() {
        let generator = MockGenerator::default();
        generator.push_response(r#"[{"type": "character", "name": "Mara", "description": "first", "sections": [1]}]"#);
        generator.push_response(r#"[{"type": "character", "name": "MARA", "description": "second", "sections": [2]}]"#);

        let config = ExtractorConfig {
            size_threshold_chars: 10,
            chunk_group_size: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(generator, config);

        let report = extractor
            .run(request("## One\naaa\n\n## Two\nbbb", BookType::Novel))
            .await
            .unwrap();

        assert_eq!(report.entities.len(), 1);
        assert_eq!(report.entities[0].name, "Mara");
        assert_eq!(report.entities[0].description, "first");
        assert_eq!(report.entities[0].links.len(), 2);
    }

    #[tokio::test]
    async fn test_collection_mode_keeps_per_story_entities() {
        let generator = MockGenerator::default();
        generator.push_response(r#"[{"type": "character", "name": "Sam", "sections": [1]}]"#);
        generator.push_response(r#"[{"type": "character", "name": "Sam", "sections": [2]}]"#);

        let config = ExtractorConfig {
            size_threshold_chars: 10,
            chunk_group_size: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(generator, config);

        let report = extractor
            .run(request("## Story A\naaa\n\n## Story B\nbbb", BookType::Collection))
            .await
            .unwrap();

        assert_eq!(report.entities.len(), 2);
        match &report.entities[0].links {
            SectionLinks::Stories(titles) => assert_eq!(titles, &vec!["Story A".to_string()]),
            other => panic!("Expected story links, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_collection_prompt_declares_distinct_characters() {
        let generator = MockGenerator::new(THREE_DRAFTS);
        let handle = generator.clone();
        let extractor = Extractor::new(generator, ExtractorConfig::default());

        extractor
            .run(request("## A\ntext\n\n## B\ntext", BookType::Collection))
            .await
            .unwrap();

        assert!(handle.prompts()[0].contains("DIFFERENT individuals"));
    }
}
