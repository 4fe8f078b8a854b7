/*!
 * Publishing of translated READMEs.
 *
 * The workflow is an injected collaborator with three operations
 * (ensure-branch, commit-and-push, open-pull-request) so the pipeline can run
 * without a real repository. `git::GitPublisher` drives `git` and `gh`.
 */

use async_trait::async_trait;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use crate::errors::PublishError;

pub mod git;

pub use self::git::GitPublisher;

/// Prefix shared by every translation branch
pub const BRANCH_PREFIX: &str = "readme-translation-";

static BRANCH_UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9._-]").expect("Invalid branch character pattern")
});

/// Whether `ensure_branch` found or created the branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    Existing,
    Created,
}

/// Whether `commit_and_push` produced a new commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    NothingToCommit,
}

/// Branch/commit/push/pull-request automation
#[async_trait]
pub trait PublishWorkflow: Send + Sync {
    /// Check out `branch`, creating it when it does not exist
    async fn ensure_branch(&self, branch: &str) -> Result<BranchState, PublishError>;

    /// Stage everything, commit with the automation identity and push `branch`
    async fn commit_and_push(&self, branch: &str, message: &str) -> Result<CommitOutcome, PublishError>;

    /// Open a pull request from `branch`; returns its URL
    async fn open_pull_request(&self, branch: &str, title: &str, body: &str) -> Result<String, PublishError>;
}

/// Branch used for a target language; the same language always maps to the same branch
pub fn branch_name_for(target_language: &str) -> String {
    let safe = BRANCH_UNSAFE_CHARS.replace_all(target_language.trim(), "-");
    format!("{}{}", BRANCH_PREFIX, safe)
}

/// Everything the workflow needs to publish one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub artifact_path: PathBuf,
    pub target_language: String,
    pub branch: String,
    pub commit_message: String,
    pub title: String,
    pub body: String,
}

impl PublishRequest {
    /// Build the commit message and pull request text for a language
    pub fn for_language(artifact_path: PathBuf, target_language: &str, language_name: Option<&str>) -> Self {
        let file_name = artifact_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("README.{}.md", target_language));

        let language_label = match language_name {
            Some(name) => format!("{} ({})", name, target_language),
            None => target_language.to_string(),
        };

        Self {
            branch: branch_name_for(target_language),
            commit_message: format!("docs: add {} translation", file_name),
            title: format!("Translate README to {}", target_language),
            body: format!(
                "This PR adds a translated README for {}.\n\nGenerated file: `{}`",
                language_label,
                artifact_path.display()
            ),
            artifact_path,
            target_language: target_language.to_string(),
        }
    }
}

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub branch: String,
    pub commit: CommitOutcome,
    pub pull_request_url: String,
}

/// Commit, push and open the pull request for an already checked-out branch
pub async fn publish(workflow: &dyn PublishWorkflow, request: &PublishRequest) -> Result<PublishReport, PublishError> {
    let commit = workflow.commit_and_push(&request.branch, &request.commit_message).await?;
    if commit == CommitOutcome::NothingToCommit {
        info!("Artifact unchanged, nothing to commit on {}", request.branch);
    }

    let pull_request_url = workflow
        .open_pull_request(&request.branch, &request.title, &request.body)
        .await?;
    info!("Pull request opened: {}", pull_request_url);

    Ok(PublishReport {
        branch: request.branch.clone(),
        commit,
        pull_request_url,
    })
}
