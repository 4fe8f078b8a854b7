use async_trait::async_trait;
use log::{debug, info};
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::app_config::PublishConfig;
use crate::errors::PublishError;

use super::{BranchState, CommitOutcome, PublishWorkflow};

/// Publish workflow backed by the `git` and `gh` command line tools
#[derive(Debug, Clone)]
pub struct GitPublisher {
    /// Working tree the commands run in
    repo_dir: PathBuf,
    /// Remote receiving the branch
    remote: String,
    /// Pull request base branch
    base_branch: String,
    /// Automation identity
    author_name: String,
    author_email: String,
    /// Per-command timeout
    timeout: Duration,
}

impl GitPublisher {
    pub fn new(repo_dir: impl Into<PathBuf>, config: &PublishConfig) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: config.remote.clone(),
            base_branch: config.base_branch.clone(),
            author_name: config.author_name.clone(),
            author_email: config.author_email.clone(),
            timeout: Duration::from_secs(config.command_timeout_secs),
        }
    }

    /// Run a command and return its raw output, failing only if it cannot run
    async fn output(&self, step: &str, program: &str, args: &[&str]) -> Result<Output, PublishError> {
        debug!("{}: {} {}", step, program, args.join(" "));

        let command_future = Command::new(program)
            .args(args)
            .current_dir(&self.repo_dir)
            .kill_on_drop(true)
            .output();

        tokio::select! {
            result = command_future => result.map_err(|e| PublishError::Spawn {
                step: step.to_string(),
                message: e.to_string(),
            }),
            _ = tokio::time::sleep(self.timeout) => Err(PublishError::Timeout {
                step: step.to_string(),
                secs: self.timeout.as_secs(),
            }),
        }
    }

    /// Run a command that must succeed; returns trimmed stdout
    async fn run(&self, step: &str, program: &str, args: &[&str]) -> Result<String, PublishError> {
        let output = self.output(step, program, args).await?;
        if !output.status.success() {
            return Err(PublishError::CommandFailed {
                step: step.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn has_staged_changes(&self) -> Result<bool, PublishError> {
        let output = self.output("git diff", "git", &["diff", "--cached", "--quiet"]).await?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(PublishError::CommandFailed {
                step: "git diff".to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

#[async_trait]
impl PublishWorkflow for GitPublisher {
    async fn ensure_branch(&self, branch: &str) -> Result<BranchState, PublishError> {
        let listed = self.run("git branch", "git", &["branch", "--list", branch]).await?;

        if listed.is_empty() {
            self.run("git checkout", "git", &["checkout", "-b", branch]).await?;
            info!("Created new branch: {}", branch);
            Ok(BranchState::Created)
        } else {
            self.run("git checkout", "git", &["checkout", branch]).await?;
            info!("Checked out existing branch: {}", branch);
            Ok(BranchState::Existing)
        }
    }

    async fn commit_and_push(&self, branch: &str, message: &str) -> Result<CommitOutcome, PublishError> {
        self.run("git add", "git", &["add", "--all"]).await?;

        let outcome = if self.has_staged_changes().await? {
            let name = format!("user.name={}", self.author_name);
            let email = format!("user.email={}", self.author_email);
            self.run("git commit", "git", &["-c", &name, "-c", &email, "commit", "-m", message]).await?;
            info!("Committed: {}", message);
            CommitOutcome::Committed
        } else {
            CommitOutcome::NothingToCommit
        };

        self.run("git push", "git", &["push", &self.remote, branch]).await?;
        info!("Pushed branch: {}", branch);
        Ok(outcome)
    }

    async fn open_pull_request(&self, branch: &str, title: &str, body: &str) -> Result<String, PublishError> {
        info!("Creating pull request...");
        self.run(
            "gh pr create",
            "gh",
            &["pr", "create", "--title", title, "--body", body, "--base", &self.base_branch, "--head", branch],
        )
        .await
    }
}
