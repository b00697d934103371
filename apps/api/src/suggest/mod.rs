//! Suggestion augmentation.
//!
//! Local heuristics always run. A remote provider, when configured, adds its own
//! suggestions under a deadline; any failure falls back to the local set.

pub mod llm;
pub mod local;
pub mod prompts;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::AnalysisResult;
use crate::classify::ClassifiedLine;
use crate::rewrite::RewriteSuggestion;

use llm::LlmError;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Suggestion provider timed out after {0:?}")]
    Timeout(Duration),
}

/// Input handed to a provider.
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub text: String,
    pub result: AnalysisResult,
}

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<RewriteSuggestion>, SuggestionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Local,
    Remote,
}

#[derive(Debug, Clone)]
pub struct Augmented {
    pub suggestions: Vec<RewriteSuggestion>,
    pub source: SuggestionSource,
}

fn push_unique(into: &mut Vec<RewriteSuggestion>, more: Vec<RewriteSuggestion>) {
    for suggestion in more {
        if !into.iter().any(|s| s.advice == suggestion.advice) {
            into.push(suggestion);
        }
    }
}

/// Merges per-signal, local and (optionally) remote suggestions, ordered by priority.
pub async fn augment(
    provider: Option<&dyn SuggestionProvider>,
    request: SuggestionRequest,
    classified: &[ClassifiedLine],
    base: Vec<RewriteSuggestion>,
    deadline: Duration,
) -> Augmented {
    let mut suggestions = base;
    push_unique(&mut suggestions, local::local_suggestions(&request.text, classified));

    let mut source = SuggestionSource::Local;
    if let Some(provider) = provider {
        let outcome = tokio::time::timeout(deadline, provider.suggest(&request))
            .await
            .unwrap_or(Err(SuggestionError::Timeout(deadline)));
        match outcome {
            Ok(remote) => {
                info!("{} returned {} suggestions", provider.name(), remote.len());
                push_unique(&mut suggestions, remote);
                source = SuggestionSource::Remote;
            }
            Err(e) => warn!("Falling back to local suggestions: {e}"),
        }
    }

    // stable: keeps insertion order within a priority
    suggestions.sort_by_key(|s| s.priority);
    Augmented {
        suggestions,
        source,
    }
}
