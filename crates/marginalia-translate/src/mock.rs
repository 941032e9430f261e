//! Mock translation backend for deterministic testing.
//!
//! Provides a mock implementation of [`TranslationProvider`] that returns
//! configurable responses and records every call for assertion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use marginalia_core::{
    Error, Result, TranslationProvider, TranslationRequest, TranslationResponse,
};

/// Mock translation backend for testing.
#[derive(Clone)]
pub struct MockTranslationBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<TranslateCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    fixed_translations: HashMap<String, String>,
    default_translation: String,
    fail: bool,
}

/// One recorded call to the mock backend.
#[derive(Debug, Clone)]
pub struct TranslateCall {
    pub text: String,
    pub source: String,
    pub target: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            fixed_translations: HashMap::new(),
            default_translation: "Mock translation".to_string(),
            fail: false,
        }
    }
}

impl MockTranslationBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the translation returned for unmapped inputs.
    pub fn with_fixed_translation(mut self, translation: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_translation = translation.into();
        self
    }

    /// Add a translation mapping for a specific input text.
    pub fn with_translation_mapping(
        mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_translations
            .insert(input.into(), output.into());
        self
    }

    /// Make every call fail with an upstream error.
    pub fn with_failure(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail = true;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<TranslateCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

impl Default for MockTranslationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationProvider for MockTranslationBackend {
    async fn translate(&self, req: &TranslationRequest) -> Result<TranslationResponse> {
        req.validate()?;

        self.call_log.lock().unwrap().push(TranslateCall {
            text: req.text.clone(),
            source: req.source.clone(),
            target: req.target.clone(),
        });

        if self.config.fail {
            return Err(Error::Upstream("Mock translation failure".to_string()));
        }

        let translation = self
            .config
            .fixed_translations
            .get(&req.text)
            .cloned()
            .unwrap_or_else(|| self.config.default_translation.clone());

        Ok(TranslationResponse {
            translation,
            source: req.source.clone(),
            target: req.target.clone(),
        })
    }
}
