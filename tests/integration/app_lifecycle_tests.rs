/*!
 * End-to-end controller runs against a mock provider and a recording publisher
 */

use anyhow::Result;
use std::sync::Arc;

use readme_translator::app_controller::Controller;
use readme_translator::errors::{AppError, PublishError};
use readme_translator::providers::mock::MockProvider;
use readme_translator::publish::{CommitOutcome, PublishWorkflow};

use crate::common;
use crate::common::recording_publisher::{PublishCall, RecordingPublisher};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Test the full happy path: translate, write, then branch/commit/PR in order
#[test]
fn test_run_withSampleReadme_shouldPublishInOrder() -> Result<()> {
    init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "README.md", common::SAMPLE_README)?;
    let publisher = RecordingPublisher::new();
    let shared: Arc<dyn PublishWorkflow> = Arc::new(publisher.clone());
    let controller = Controller::new(
        common::config_for(temp_dir.path(), "fr"),
        Arc::new(MockProvider::working()),
        Some(shared),
    );

    let report = tokio_test::block_on(controller.run())?;

    let expected_path = temp_dir.path().join("readme").join("README.fr.md");
    assert_eq!(report.artifact_path, expected_path);
    assert_eq!(report.branch.as_deref(), Some("readme-translation-fr"));
    assert!(report.summary.translated > 0);

    let publish = report.publish.expect("publish report");
    assert_eq!(publish.commit, CommitOutcome::Committed);
    assert!(publish.pull_request_url.starts_with("https://"));

    assert_eq!(
        publisher.calls(),
        vec![
            PublishCall::EnsureBranch("readme-translation-fr".to_string()),
            PublishCall::CommitAndPush {
                branch: "readme-translation-fr".to_string(),
                message: "docs: add README.fr.md translation".to_string(),
            },
            PublishCall::OpenPullRequest {
                branch: "readme-translation-fr".to_string(),
                title: "Translate README to fr".to_string(),
            },
        ]
    );

    let written = std::fs::read_to_string(&expected_path)?;
    assert!(written.contains("cargo install sample"));
    assert!(written.contains("https://img.shields.io/badge/build-passing-green.svg"));
    assert!(written.contains("fr"));
    Ok(())
}

/// Test that the source README is never modified
#[tokio::test]
async fn test_run_shouldLeaveSourceReadmeUntouched() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "README.md", common::SAMPLE_README)?;

    Controller::new(
        common::config_for(temp_dir.path(), "de"),
        Arc::new(MockProvider::working()),
        None,
    )
    .run()
    .await?;

    assert_eq!(std::fs::read_to_string(&source)?, common::SAMPLE_README);
    Ok(())
}

/// Test that a missing README is an input error with no side effects
#[tokio::test]
async fn test_run_withoutReadme_shouldReturnInputError() -> Result<()> {
    init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "CHANGELOG.md", "# Changes\n")?;
    let provider = MockProvider::working();
    let publisher = RecordingPublisher::new();
    let shared: Arc<dyn PublishWorkflow> = Arc::new(publisher.clone());

    let result = Controller::new(
        common::config_for(temp_dir.path(), "fr"),
        Arc::new(provider.clone()),
        Some(shared),
    )
    .run()
    .await;

    assert!(matches!(result, Err(AppError::Input(_))));
    assert_eq!(provider.request_count(), 0);
    assert!(publisher.calls().is_empty());
    assert_eq!(common::list_files(temp_dir.path()), vec![temp_dir.path().join("CHANGELOG.md")]);
    Ok(())
}

/// Test that without a publisher the artifact is written and nothing else happens
#[tokio::test]
async fn test_run_withPublishingDisabled_shouldOnlyWriteArtifact() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "README.md", "# Title\n\nHello world.\n")?;

    let report = Controller::new(
        common::config_for(temp_dir.path(), "it"),
        Arc::new(MockProvider::working()),
        None,
    )
    .run()
    .await?;

    assert!(report.publish.is_none());
    assert!(report.branch.is_none());
    assert!(report.artifact_path.exists());
    assert_eq!(report.summary.units, 2);
    Ok(())
}

/// Test that a failing pull request step surfaces but keeps the artifact
#[tokio::test]
async fn test_run_withPullRequestFailure_shouldKeepArtifact() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "README.md", "Hello.\n")?;
    let publisher = RecordingPublisher::failing_pull_request();
    let shared: Arc<dyn PublishWorkflow> = Arc::new(publisher.clone());

    let result = Controller::new(
        common::config_for(temp_dir.path(), "fr"),
        Arc::new(MockProvider::working()),
        Some(shared),
    )
    .run()
    .await;

    match result {
        Err(AppError::Publish(PublishError::CommandFailed { step, stderr, .. })) => {
            assert_eq!(step, "gh pr create");
            assert!(stderr.contains("already exists"));
        }
        other => panic!("expected a publish failure, got {:?}", other.map(|r| r.artifact_path)),
    }
    assert!(temp_dir.path().join("readme").join("README.fr.md").exists());
    assert_eq!(publisher.calls().len(), 3);
    Ok(())
}

/// Test that from_config rejects an invalid target language before doing any work
#[test]
fn test_fromConfig_withInvalidLanguage_shouldReturnConfigError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::config_for(temp_dir.path(), "not a language");

    let result = Controller::from_config(config);

    assert!(matches!(result, Err(AppError::Config(_))));
    Ok(())
}

/// Test that a provider error on every unit reports each failure
#[tokio::test]
async fn test_run_withFailingProvider_shouldReportEveryUnit() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "README.md", "One\n\nTwo\n\nThree\n")?;

    let result = Controller::new(
        common::config_for(temp_dir.path(), "fr"),
        Arc::new(MockProvider::failing()),
        None,
    )
    .run()
    .await;

    let error = match result {
        Err(error) => error,
        Ok(report) => panic!("expected failure, got {:?}", report.artifact_path),
    };
    let message = error.to_string();
    assert!(message.contains("3 of 3 translation units failed"), "{}", message);
    assert!(message.contains("\"One\""));
    assert!(!temp_dir.path().join("readme").exists());
    Ok(())
}
