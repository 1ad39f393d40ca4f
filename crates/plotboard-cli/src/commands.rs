//! Command implementations.

use crate::cli::{ExtractArgs, ImportArgs, StatusArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use plotboard_domain::{BookType, Project};
use plotboard_extractor::{segment, ExtractionRequest, Extractor};
use plotboard_llm::OllamaGenerator;
use std::fs;

/// Import a markdown manuscript into a new project file.
pub fn execute_import(args: ImportArgs) -> Result<()> {
    let book_type = BookType::parse(&args.book_type)
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown book type '{}'", args.book_type)))?;

    let text = fs::read_to_string(&args.manuscript)?;
    let manuscript = segment(&text);

    let fallback_title = args
        .manuscript
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Untitled".to_string());

    let project = Project::from_manuscript(&manuscript, book_type, &fallback_title);
    fs::write(&args.output, project.to_json()?)?;

    let front = manuscript.sections.iter().filter(|s| s.is_front_matter).count();
    println!(
        "Imported '{}': {} section(s){} -> {}",
        project.title,
        manuscript.sections.len() - front,
        if front > 0 { " + front matter" } else { "" },
        args.output.display()
    );
    Ok(())
}

/// Run entity extraction for a project file, merging results in place.
pub async fn execute_extract(args: ExtractArgs, config: &Config) -> Result<()> {
    let model = config.resolve_model(args.model.as_deref())?;
    let endpoint = args.endpoint.clone().unwrap_or_else(|| config.endpoint.clone());

    let contents = fs::read_to_string(&args.project)?;
    let mut project = Project::from_json(&contents)?;
    let sections = project.sections()?;

    let generator = OllamaGenerator::new(endpoint, model);
    let extractor = Extractor::new(generator, config.extractor.clone());

    let request = ExtractionRequest {
        sections,
        book_type: project.book_type,
    };
    let report = extractor.run(request).await?;

    project.merge_extracted(&report.entities);
    fs::write(&args.project, project.to_json()?)?;

    println!(
        "Extracted {} entities ({}/{} chunk(s) failed{})",
        report.entities.len(),
        report.chunks_failed,
        report.chunks_attempted,
        if report.fell_back_to_chunks {
            ", fell back to chunked requests"
        } else {
            ""
        }
    );
    print!("{}", report.log.render());
    Ok(())
}

/// Show a summary of a project file.
pub fn execute_status(args: StatusArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.project)?;
    let project = Project::from_json(&contents)?;

    println!("Title:     {}", project.title);
    println!("Book type: {}", project.book_type.as_str());
    println!("Chapters:  {}", project.chapters.len());
    println!("Entities:  {}", project.entities.len());
    if !project.custom_folders.is_empty() {
        println!("Folders:   {}", project.custom_folders.join(", "));
    }
    Ok(())
}
