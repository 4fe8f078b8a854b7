/*!
 * # readme-translator
 *
 * A Rust library for translating a repository README into another language
 * while keeping its Markdown structure, and publishing the result as a pull
 * request.
 *
 * ## Features
 *
 * - Translate only human-readable text; headings, lists, code, links and
 *   HTML are preserved as they are
 * - Concurrent provider calls with an all-or-nothing completion barrier
 * - Translation providers:
 *   - Google Translate (keyless web endpoint)
 *   - LibreTranslate
 * - Deterministic output path and branch name per target language
 * - Branch, commit, push and pull request through `git` and `gh`
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Markdown document tree and the comrak adapter
 * - `translation`: Text unit extraction and the translation orchestrator
 * - `artifact_writer`: Per-language output files
 * - `publish`: Branch/commit/pull-request workflow
 * - `providers`: Client implementations for translation services
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Test names follow test_subject_condition_shouldOutcome
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod artifact_writer;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod publish;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunReport};
pub use artifact_writer::ArtifactWriter;
pub use document::{DocumentTree, NodeId, NodeKind};
pub use errors::{AppError, DocumentError, ProviderError, PublishError, TranslationError};
pub use translation::{TranslationOrchestrator, TranslationSummary, TranslationUnit};
