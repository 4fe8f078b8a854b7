/*!
 * Pipeline properties: structure round trip, identity-based apply,
 * the all-or-nothing barrier, idempotent re-runs and output paths
 */

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use readme_translator::app_controller::Controller;
use readme_translator::artifact_writer::ArtifactWriter;
use readme_translator::document::markdown;
use readme_translator::errors::{AppError, TranslationError};
use readme_translator::providers::mock::MockProvider;
use readme_translator::publish::PublishWorkflow;
use readme_translator::TranslationOrchestrator;

use crate::common;
use crate::common::recording_publisher::{PublishCall, RecordingPublisher};

fn controller_with(root: &Path, language: &str, provider: MockProvider, publisher: &RecordingPublisher) -> Controller {
    let publisher: Arc<dyn PublishWorkflow> = Arc::new(publisher.clone());
    Controller::new(common::config_for(root, language), Arc::new(provider), Some(publisher))
}

/// Test that a README without prose is written back structurally unchanged
#[tokio::test]
async fn test_run_withStructureOnlyReadme_shouldPreserveStructure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "README.md", common::STRUCTURE_ONLY_README)?;
    let provider = MockProvider::working();
    let publisher = RecordingPublisher::new();

    let report = controller_with(temp_dir.path(), "fr", provider.clone(), &publisher).run().await?;

    let expected = markdown::serialize(&markdown::parse(common::STRUCTURE_ONLY_README))?;
    let written = std::fs::read_to_string(&report.artifact_path)?;
    assert_eq!(written, expected);
    assert!(written.contains("fn main() {}"));
    assert!(written.contains("<div align=\"center\"></div>"));
    assert_eq!(provider.request_count(), 0);
    assert_eq!(report.summary.units, 0);
    Ok(())
}

/// Test that a slow unit still lands on its own node
#[tokio::test]
async fn test_translateDocument_withSlowFirstUnit_shouldApplyByIdentity() -> Result<()> {
    let mut tree = markdown::parse("Alpha\n\nBeta\n\nGamma\n");
    let ids: Vec<_> = tree.text_units().map(|unit| unit.id).collect();
    let provider = MockProvider::working().with_delay("Alpha", Duration::from_millis(80));
    let orchestrator = TranslationOrchestrator::new(Arc::new(provider.clone()), 3);

    let summary = orchestrator.translate_document(&mut tree, "de", |_, _| {}).await?;

    assert_eq!(summary.translated, 3);
    assert_eq!(provider.completions().last().map(String::as_str), Some("Alpha"));
    assert_eq!(tree.text_value(ids[0]), Some("[de] Alpha"));
    assert_eq!(tree.text_value(ids[1]), Some("[de] Beta"));
    assert_eq!(tree.text_value(ids[2]), Some("[de] Gamma"));
    Ok(())
}

/// Test that identical source texts each receive their own result
#[tokio::test]
async fn test_translateDocument_withDuplicateTexts_shouldFillEveryNode() -> Result<()> {
    let mut tree = markdown::parse("Hello\n\n- Hello\n- Hello\n");
    let orchestrator = TranslationOrchestrator::new(Arc::new(MockProvider::working()), 2);

    orchestrator.translate_document(&mut tree, "es", |_, _| {}).await?;

    let values: Vec<String> = tree.text_units().map(|unit| unit.source).collect();
    assert_eq!(values, vec!["[es] Hello"; 3]);
    Ok(())
}

/// Test that one failing unit aborts the run before anything is written or published
#[tokio::test]
async fn test_run_withOneFailingUnit_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "README.md", common::SAMPLE_README)?;
    let provider = MockProvider::failing_on("Installation");
    let publisher = RecordingPublisher::new();

    let result = controller_with(temp_dir.path(), "fr", provider.clone(), &publisher).run().await;

    match result {
        Err(AppError::Translation(TranslationError::UnitsFailed { failures, total })) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].excerpt, "Installation");
            assert!(total > 1);
        }
        other => panic!("expected a translation failure, got {:?}", other.map(|r| r.artifact_path)),
    }
    // Every unit was still attempted before the barrier decided
    assert!(provider.request_count() > 1);
    assert!(!temp_dir.path().join("readme").exists());
    assert!(publisher.calls().is_empty());
    Ok(())
}

/// Test that running twice produces the same artifact on the same branch
#[tokio::test]
async fn test_run_twice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "README.md", common::SAMPLE_README)?;
    let publisher = RecordingPublisher::new();

    let first = controller_with(temp_dir.path(), "fr", MockProvider::working(), &publisher).run().await?;
    let first_content = std::fs::read(&first.artifact_path)?;
    let second = controller_with(temp_dir.path(), "fr", MockProvider::working(), &publisher).run().await?;
    let second_content = std::fs::read(&second.artifact_path)?;

    assert_eq!(first.artifact_path, second.artifact_path);
    assert_eq!(first_content, second_content);
    assert_eq!(first.branch, second.branch);
    assert_eq!(publisher.branches(), vec!["readme-translation-fr".to_string()]);

    let ensure_calls: Vec<_> = publisher
        .calls()
        .into_iter()
        .filter(|call| matches!(call, PublishCall::EnsureBranch(_)))
        .collect();
    assert_eq!(ensure_calls.len(), 2);
    assert_eq!(common::list_files(&temp_dir.path().join("readme")), vec![first.artifact_path.clone()]);
    Ok(())
}

/// Test that a README with no text never reaches the provider
#[tokio::test]
async fn test_translateDocument_withEmptyDocument_shouldNotCallProvider() -> Result<()> {
    let provider = MockProvider::failing();
    let orchestrator = TranslationOrchestrator::new(Arc::new(provider.clone()), 4);
    let mut tree = markdown::parse("");

    let summary = orchestrator.translate_document(&mut tree, "fr", |_, _| {}).await?;

    assert_eq!(summary.units, 0);
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

/// Test that the output path depends only on the directory, name and language
#[test]
fn test_artifactPath_shouldBeDeterministic() {
    let writer = ArtifactWriter::new("/repo/readme");

    assert_eq!(writer.artifact_path("/repo/README.md", "fr"), Path::new("/repo/readme/README.fr.md"));
    assert_eq!(writer.artifact_path("/elsewhere/README.md", "fr"), Path::new("/repo/readme/README.fr.md"));
    assert_eq!(writer.artifact_path("/repo/README.md", "pt-BR"), Path::new("/repo/readme/README.pt-BR.md"));
}

/// Test that the artifact is named after the README that was found
#[tokio::test]
async fn test_run_withLowercaseReadme_shouldKeepItsName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.md", "# Hello\n")?;
    let publisher = RecordingPublisher::new();

    let report = controller_with(temp_dir.path(), "ja", MockProvider::working(), &publisher).run().await?;

    assert_eq!(report.artifact_path, temp_dir.path().join("readme").join("readme.ja.md"));
    let written = std::fs::read_to_string(&report.artifact_path)?;
    assert!(written.starts_with("# "));
    assert!(written.contains("ja") && written.contains("Hello"));
    Ok(())
}

/// Test that a hard-wrapped sentence reaches the provider in one request
#[tokio::test]
async fn test_run_withWrappedParagraph_shouldTranslateWholeSentence() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(
        temp_dir.path(),
        "README.md",
        "# Usage\n\nRun the tool from the repository root and it will\nwrite the translated file next to the source.\n",
    )?;
    let provider = MockProvider::working();
    let publisher = RecordingPublisher::new();

    let report = controller_with(temp_dir.path(), "fr", provider.clone(), &publisher).run().await?;

    assert_eq!(
        provider.requests().len(),
        2,
        "heading and paragraph should be one request each: {:?}",
        provider.requests()
    );
    assert!(provider.requests().contains(
        &"Run the tool from the repository root and it will\nwrite the translated file next to the source.".to_string()
    ));
    let written = std::fs::read_to_string(&report.artifact_path)?;
    assert!(written.contains("Run the tool from the repository root and it will\nwrite the translated file"));
    Ok(())
}
