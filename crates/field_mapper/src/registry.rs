//! The field mapping registry.
//!
//! Holds one strategy per output column and applies them in schema order
//! to produce a [`MappedRecord`]. Columns with no registered strategy are
//! emitted as empty strings - the distributor schema is fixed-width, so
//! columns are never omitted.
//!
//! The completion service is injected at construction and scoped to one
//! batch run; nothing in this crate reaches for shared module state.

use crate::strategy::{render_prompt, MappingStrategy};
use config_manager::EffectiveConfig;
use feed_model::{BookMetadata, ColumnSchema, MappedField, MappedRecord, ValueOrigin};
use llm_client::{CompletionRequest, FieldCompleter};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Registry of mapping strategies keyed by output column name.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use field_mapper::{FieldMappingRegistry, MappingStrategy};
/// use llm_client::DisabledFieldCompleter;
///
/// let mut registry = FieldMappingRegistry::new(Arc::new(DisabledFieldCompleter));
/// registry.register(
///     "Title",
///     MappingStrategy::Direct { field: "title".to_string() },
/// );
/// ```
pub struct FieldMappingRegistry {
    strategies: HashMap<String, MappingStrategy>,
    completer: Arc<dyn FieldCompleter>,
}

impl FieldMappingRegistry {
    /// Create a registry around the given completion service.
    pub fn new(completer: Arc<dyn FieldCompleter>) -> Self {
        Self {
            strategies: HashMap::new(),
            completer,
        }
    }

    /// Register the strategy for an output column.
    ///
    /// A column holds at most one strategy; registering again replaces
    /// the earlier entry.
    pub fn register(&mut self, column: impl Into<String>, strategy: MappingStrategy) {
        let column = column.into();
        if self.strategies.insert(column.clone(), strategy).is_some() {
            debug!(column = %column, "Replaced existing mapping strategy");
        }
    }

    /// Whether a column has a registered strategy.
    pub fn is_registered(&self, column: &str) -> bool {
        self.strategies.contains_key(column)
    }

    /// Map one book onto the full column schema.
    ///
    /// Returns exactly one value per schema column, in schema order.
    /// Mapping is total: strategy failures degrade to fallback values and
    /// are logged, never raised. Given identical metadata and
    /// configuration, the result is identical (completion calls are
    /// shielded by the metadata cache in that case).
    #[instrument(skip_all, fields(isbn = metadata.isbn13.as_deref().unwrap_or("unassigned")))]
    pub async fn map_all(
        &self,
        metadata: &BookMetadata,
        config: &EffectiveConfig,
        schema: &ColumnSchema,
    ) -> MappedRecord {
        let mut fields = Vec::with_capacity(schema.len());

        for column in schema.iter() {
            let (value, origin) = match self.strategies.get(column) {
                Some(strategy) => {
                    let value = self.evaluate(strategy, column, metadata, config).await;
                    (value, strategy.origin())
                }
                // Unmapped columns are empty, never omitted.
                None => (String::new(), ValueOrigin::Unregistered),
            };

            let (value, origin) = apply_config_rules(column, value, origin, config);
            fields.push(MappedField::new(column, value, origin));
        }

        MappedRecord::new(fields)
    }

    /// Evaluate one strategy, degrading to its fallback on failure.
    async fn evaluate(
        &self,
        strategy: &MappingStrategy,
        column: &str,
        metadata: &BookMetadata,
        config: &EffectiveConfig,
    ) -> String {
        if let Some(value) = strategy.evaluate_sync(metadata, config) {
            return value;
        }

        // Only the completion strategy evaluates asynchronously.
        let MappingStrategy::LlmCompletion {
            metadata_field,
            prompt_template,
            fallback,
        } = strategy
        else {
            return String::new();
        };

        self.complete(column, metadata_field.as_deref(), prompt_template, fallback, metadata)
            .await
    }

    /// The completion ladder: cache, direct metadata field, completer
    /// with a single retry on transient failure, configured fallback.
    async fn complete(
        &self,
        column: &str,
        metadata_field: Option<&str>,
        prompt_template: &str,
        fallback: &str,
        metadata: &BookMetadata,
    ) -> String {
        if let Some(cached) = metadata.llm_completions.get(column) {
            debug!(column = %column, "Using cached completion value");
            return cached.clone();
        }

        if let Some(field) = metadata_field {
            if let Some(value) = metadata.direct_field(field) {
                if !value.is_empty() {
                    debug!(column = %column, field = %field, "Using direct metadata value");
                    return value;
                }
            }
        }

        let request = build_request(column, prompt_template, metadata);

        match self.completer.complete_field(&request).await {
            Ok(value) => return value,
            Err(error) if error.is_transient() => {
                warn!(
                    column = %column,
                    error = %error,
                    "Completion failed, retrying once"
                );
            }
            Err(error) => {
                warn!(
                    column = %column,
                    error = %error,
                    "Completion failed, using fallback value"
                );
                return fallback.to_string();
            }
        }

        match self.completer.complete_field(&request).await {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    column = %column,
                    error = %error,
                    "Completion retry failed, using fallback value"
                );
                fallback.to_string()
            }
        }
    }
}

impl std::fmt::Debug for FieldMappingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMappingRegistry")
            .field("strategies", &self.strategies.len())
            .finish()
    }
}

fn build_request(
    column: &str,
    prompt_template: &str,
    metadata: &BookMetadata,
) -> CompletionRequest {
    let mut request =
        CompletionRequest::new(column, render_prompt(prompt_template, column, metadata))
            .with_context("title", metadata.title.as_str());

    if let Some(contributor) = metadata.primary_contributor() {
        request = request.with_context("contributor", contributor.name.as_str());
    }
    if let Some(description) = &metadata.short_description {
        request = request.with_context("short_description", description.as_str());
    }

    request
}

/// Apply the configuration's post-strategy rules to one mapped value.
///
/// `field_overrides` replace the strategy output (or, for append-type
/// columns, concatenate onto it); `blank_fields` force empty last and win
/// over everything.
fn apply_config_rules(
    column: &str,
    value: String,
    origin: ValueOrigin,
    config: &EffectiveConfig,
) -> (String, ValueOrigin) {
    let (value, origin) = match config.field_override(column) {
        Some(override_value) if config.is_append_field(column) => {
            let combined = if value.is_empty() {
                override_value.to_string()
            } else {
                format!("{} {}", value, override_value)
            };
            (combined, ValueOrigin::ConfigOverride)
        }
        Some(override_value) => (override_value.to_string(), ValueOrigin::ConfigOverride),
        None => (value, origin),
    };

    if config.is_blank_field(column) {
        (String::new(), ValueOrigin::ForcedBlank)
    } else {
        (value, origin)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
