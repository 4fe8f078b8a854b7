/*!
 * Translation of README documents.
 *
 * - `extractor`: document-order extraction of translatable text units
 * - `orchestrator`: concurrent dispatch, completion barrier and write-back
 */

// Re-export main types for easier usage
pub use self::extractor::{TextUnits, TranslationUnit};
pub use self::orchestrator::{TranslationOrchestrator, TranslationSummary};

// Submodules
pub mod extractor;
pub mod orchestrator;
