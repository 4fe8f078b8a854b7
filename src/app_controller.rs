use log::{info, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::artifact_writer::ArtifactWriter;
use crate::document::markdown;
use crate::errors::AppError;
use crate::file_utils::{FileManager, README_NAMES};
use crate::language_utils;
use crate::providers::{self, Provider};
use crate::publish::{self, GitPublisher, PublishReport, PublishRequest, PublishWorkflow};
use crate::translation::{TranslationOrchestrator, TranslationSummary};

// @module: Application controller for README translation runs

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Where the translated README was written
    pub artifact_path: PathBuf,
    /// Branch the artifact was published on, if publishing ran
    pub branch: Option<String>,
    /// Translation statistics
    pub summary: TranslationSummary,
    /// Publish result, if publishing ran
    pub publish: Option<PublishReport>,
}

/// Main application controller for README translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation driver
    orchestrator: TranslationOrchestrator,
    // @field: Branch/commit/PR automation, absent when publishing is off
    publisher: Option<Arc<dyn PublishWorkflow>>,
    // @field: Show a progress bar while translating
    show_progress: bool,
}

impl Controller {
    /// Create a controller with explicit collaborators
    pub fn new(config: Config, provider: Arc<dyn Provider>, publisher: Option<Arc<dyn PublishWorkflow>>) -> Self {
        let orchestrator = TranslationOrchestrator::new(provider, config.translation.optimal_concurrent_requests());
        Self {
            config,
            orchestrator,
            publisher,
            show_progress: false,
        }
    }

    // @method: Create a controller with the configured provider and git publisher
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        config.validate().map_err(|e| AppError::Config(format!("{:#}", e)))?;

        let provider = providers::build_provider(&config.translation)
            .map_err(|e| AppError::Config(e.to_string()))?;
        let publisher: Option<Arc<dyn PublishWorkflow>> = if config.publish.enabled {
            Some(Arc::new(GitPublisher::new(&config.root_dir, &config.publish)))
        } else {
            None
        };

        Ok(Self::new(config, provider, publisher).with_progress(true))
    }

    /// Enable or disable the terminal progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline: locate, parse, translate, write, publish
    pub async fn run(&self) -> Result<RunReport, AppError> {
        let target_language = self.config.target_language.as_str();
        let root_dir = &self.config.root_dir;

        let source_path = FileManager::find_readme(root_dir)
            .map_err(|e| AppError::File(format!("{:#}", e)))?
            .ok_or_else(|| AppError::Input(format!(
                "No README found in {:?} (looked for {})",
                root_dir,
                README_NAMES.join(", ")
            )))?;
        info!("Translating {:?} to {} using {}", source_path, target_language, self.orchestrator.provider_name());

        let source = FileManager::read_to_string(&source_path)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        let mut tree = markdown::parse(&source);
        info!("Parsed document: {} nodes, {} text runs", tree.node_count(), tree.text_count());

        let summary = self.translate_with_progress(&mut tree, target_language).await?;

        let branch = publish::branch_name_for(target_language);
        if let Some(publisher) = &self.publisher {
            publisher.ensure_branch(&branch).await?;
        }

        let writer = ArtifactWriter::new(self.config.output_dir());
        let artifact_path = writer.write(&tree, &source_path, target_language)?;
        info!("Translated README written to {:?}", artifact_path);

        let publish = match &self.publisher {
            Some(publisher) => {
                let language_name = language_utils::get_language_name(target_language).ok();
                let request = PublishRequest::for_language(artifact_path.clone(), target_language, language_name.as_deref());
                let report = publish::publish(publisher.as_ref(), &request).await?;
                info!("Published on branch {}", report.branch);
                Some(report)
            }
            None => {
                warn!("Publishing disabled, artifact left in the working tree");
                None
            }
        };

        Ok(RunReport {
            artifact_path,
            branch: publish.as_ref().map(|report| report.branch.clone()),
            summary,
            publish,
        })
    }

    async fn translate_with_progress(
        &self,
        tree: &mut crate::document::DocumentTree,
        target_language: &str,
    ) -> Result<TranslationSummary, AppError> {
        let progress_bar = if self.show_progress {
            let bar = ProgressBar::new(tree.text_count() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} text runs")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        } else {
            ProgressBar::hidden()
        };

        let result = self
            .orchestrator
            .translate_document(tree, target_language, |done, total| {
                progress_bar.set_length(total as u64);
                progress_bar.set_position(done as u64);
            })
            .await;

        progress_bar.finish_and_clear();
        Ok(result?)
    }
}
