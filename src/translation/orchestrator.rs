/*!
 * Translation orchestrator.
 *
 * Runs one document through the provider in three explicit phases:
 * 1. Extraction: collect every text node as a unit, in document order
 * 2. Dispatch: translate all units concurrently (bounded)
 * 3. Apply: once every unit succeeded, write results back by node id
 *
 * Nothing is written into the tree unless phase 2 succeeded for every unit.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::document::{DocumentTree, NodeId};
use crate::errors::{ProviderError, TranslationError, UnitFailure};
use crate::providers::Provider;

use super::extractor::TranslationUnit;

/// Characters of source text kept in failure reports
const EXCERPT_CHARS: usize = 40;

/// Outcome of a successful document translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSummary {
    /// Number of text units in the document
    pub units: usize,
    /// Units sent to the provider
    pub translated: usize,
    /// Whitespace-only units kept as they were
    pub passthrough: usize,
    /// Wall time of dispatch and apply
    pub elapsed: Duration,
}

/// Translated value of a single unit
enum UnitOutcome {
    Translated(String),
    Passthrough(String),
}

/// Drives the translation of a document tree
#[derive(Debug, Clone)]
pub struct TranslationOrchestrator {
    /// Provider used for every unit
    provider: Arc<dyn Provider>,
    /// Maximum number of in-flight provider calls
    max_concurrent_requests: usize,
}

impl TranslationOrchestrator {
    /// Create a new orchestrator
    pub fn new(provider: Arc<dyn Provider>, max_concurrent_requests: usize) -> Self {
        Self {
            provider,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Translate every text node of `tree` into `target_language`.
    ///
    /// `progress` is called with `(completed, total)` after each unit finishes.
    /// On error the tree is unchanged.
    pub async fn translate_document<F>(
        &self,
        tree: &mut DocumentTree,
        target_language: &str,
        progress: F,
    ) -> Result<TranslationSummary, TranslationError>
    where
        F: Fn(usize, usize),
    {
        let start_time = Instant::now();
        let units: Vec<TranslationUnit> = tree.text_units().collect();
        let total = units.len();

        if total == 0 {
            info!("Document has no text to translate");
            return Ok(TranslationSummary {
                units: 0,
                translated: 0,
                passthrough: 0,
                elapsed: start_time.elapsed(),
            });
        }

        // Connectivity problems show up here once instead of once per unit
        if let Err(e) = self.provider.test_connection().await {
            warn!("{} connection check failed: {}", self.provider.name(), e);
        }

        info!(
            "Translating {} text units to {} with {} (up to {} concurrent requests)",
            total,
            target_language,
            self.provider.name(),
            self.max_concurrent_requests
        );

        let provider = self.provider.as_ref();
        let mut outcomes = stream::iter(units)
            .map(|unit| async move {
                let result = translate_unit(provider, &unit.source, target_language).await;
                (unit, result)
            })
            .buffer_unordered(self.max_concurrent_requests);

        let mut translations: HashMap<NodeId, String> = HashMap::with_capacity(total);
        let mut failures = Vec::new();
        let mut translated = 0;
        let mut passthrough = 0;
        let mut completed = 0;

        // Completion barrier: drain every in-flight request before deciding
        while let Some((unit, result)) = outcomes.next().await {
            completed += 1;
            progress(completed, total);

            match result {
                Ok(UnitOutcome::Translated(text)) => {
                    translated += 1;
                    translations.insert(unit.id, text);
                }
                Ok(UnitOutcome::Passthrough(text)) => {
                    passthrough += 1;
                    translations.insert(unit.id, text);
                }
                Err(error) => {
                    debug!("Unit {} failed: {}", unit.id, error);
                    failures.push(UnitFailure {
                        node: unit.id,
                        excerpt: excerpt(&unit.source),
                        error,
                    });
                }
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|failure| failure.node);
            error!("{} of {} translation units failed, document left untouched", failures.len(), total);
            return Err(TranslationError::UnitsFailed { failures, total });
        }

        tree.replace_text_values(translations)?;

        let summary = TranslationSummary {
            units: total,
            translated,
            passthrough,
            elapsed: start_time.elapsed(),
        };
        info!(
            "Translated {} units ({} unchanged) in {:.1}s",
            summary.translated,
            summary.passthrough,
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }
}

/// Translate one unit, keeping its surrounding whitespace.
///
/// Inline text runs carry the spaces that separate them from neighbouring
/// emphasis, code spans and links; providers trim those.
async fn translate_unit(
    provider: &dyn Provider,
    source: &str,
    target_language: &str,
) -> Result<UnitOutcome, ProviderError> {
    let (leading, core, trailing) = split_padding(source);
    if core.is_empty() {
        return Ok(UnitOutcome::Passthrough(source.to_string()));
    }

    let translated = provider.translate(core, target_language).await?;
    Ok(UnitOutcome::Translated(format!("{}{}{}", leading, translated.trim(), trailing)))
}

fn split_padding(text: &str) -> (&str, &str, &str) {
    let without_leading = text.trim_start();
    let leading = &text[..text.len() - without_leading.len()];
    let core = without_leading.trim_end();
    let trailing = &without_leading[core.len()..];
    (leading, core, trailing)
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= EXCERPT_CHARS {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(EXCERPT_CHARS).collect();
        format!("{}…", head)
    }
}
