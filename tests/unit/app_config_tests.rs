/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use std::path::Path;
use readme_translator::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use crate::common;

/// Test that default configuration targets zh-CN through Google
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.target_language, "zh-CN");
    assert_eq!(config.output_dir_name, "readme");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.get_endpoint(), "https://translate.googleapis.com");
    assert_eq!(config.translation.optimal_concurrent_requests(), 4);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.publish.enabled);
    assert_eq!(config.publish.base_branch, "main");
    assert!(config.validate().is_ok());
}

/// Test that output_dir joins the root and the directory name
#[test]
fn test_output_dir_shouldJoinRootAndName() {
    let config = common::config_for(Path::new("/repo"), "fr");

    assert_eq!(config.output_dir(), Path::new("/repo/readme"));
}

/// Test that malformed language tags are rejected
#[test]
fn test_validate_withInvalidLanguage_shouldFail() {
    for tag in ["", "fr fr", "../etc", "zz"] {
        let config = common::config_for(Path::new("."), tag);
        assert!(config.validate().is_err(), "tag {:?} should be rejected", tag);
    }
}

/// Test that region-qualified tags are accepted
#[test]
fn test_validate_withRegionTag_shouldPass() {
    for tag in ["zh-CN", "pt-BR", "fr", "deu"] {
        let config = common::config_for(Path::new("."), tag);
        assert!(config.validate().is_ok(), "tag {:?} should be accepted", tag);
    }
}

/// Test that an unparsable endpoint is rejected
#[test]
fn test_validate_withInvalidEndpoint_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::LibreTranslate;
    let mut libre = ProviderConfig::new(TranslationProvider::LibreTranslate);
    libre.endpoint = "not a url".to_string();
    config.translation.available_providers = vec![libre];

    assert!(config.validate().is_err());
}

/// Test that zero concurrency is rejected
#[test]
fn test_validate_withZeroConcurrency_shouldFail() {
    let mut config = Config::default();
    for provider in config.translation.available_providers.iter_mut() {
        provider.concurrent_requests = 0;
    }

    assert!(config.validate().is_err());
}

/// Test that a missing config file falls back to defaults
#[test]
fn test_load_or_default_withMissingFile_shouldReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let config = Config::load_or_default(temp_dir.path().join("absent.json"))?;

    assert_eq!(config.target_language, "zh-CN");
    assert!(!temp_dir.path().join("absent.json").exists());
    Ok(())
}

/// Test that a partial config file keeps defaults for omitted fields
#[test]
fn test_load_or_default_withPartialFile_shouldMergeDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "readme-translator.json",
        r#"{
            "target_language": "de",
            "translation": { "provider": "libretranslate" },
            "publish": { "enabled": false }
        }"#,
    )?;

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.provider, TranslationProvider::LibreTranslate);
    assert_eq!(config.translation.get_endpoint(), "http://localhost:5000");
    assert_eq!(config.translation.get_rate_limit(), None);
    assert!(!config.publish.enabled);
    assert_eq!(config.publish.remote, "origin");
    assert_eq!(config.output_dir_name, "readme");
    Ok(())
}

/// Test that a malformed config file is an error
#[test]
fn test_load_or_default_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", "{ target_language: ")?;

    assert!(Config::load_or_default(&path).is_err());
    Ok(())
}

/// Test provider parsing from strings
#[test]
fn test_translation_provider_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("Google".parse::<TranslationProvider>().ok(), Some(TranslationProvider::Google));
    assert_eq!(
        "LIBRETRANSLATE".parse::<TranslationProvider>().ok(),
        Some(TranslationProvider::LibreTranslate)
    );
    assert!("deepl".parse::<TranslationProvider>().is_err());
}
