//! Mapping strategies.
//!
//! A strategy is one rule for producing a single output column's value
//! from a book's metadata and the effective configuration. The set of
//! strategies is closed: the registry dispatches on this enum rather than
//! on trait objects, so an unhandled variant is a compile error.

use config_manager::EffectiveConfig;
use feed_model::{BookMetadata, ValueOrigin};

/// Pages-per-inch for supported paper stocks, used for spine width.
///
/// The distributor quotes spine width from page count and stock; stocks
/// not listed here fall back to the standard white stock.
const PAPER_STOCK_PPI: &[(&str, f64)] = &[
    ("white-50lb", 444.0),
    ("creme-50lb", 426.0),
    ("white-70lb", 340.0),
];

const DEFAULT_PPI: f64 = 444.0;
const MM_PER_INCH: f64 = 25.4;

/// A derivation over one or more metadata attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedField {
    /// Spine width in millimetres from page count and paper stock.
    SpineWidthMm,
    /// Title and subtitle joined with ": ".
    FullTitle,
    /// All contributor names joined with "; " in billing order.
    ContributorDisplay,
    /// Name of the first contributor in billing order.
    PrimaryContributorName,
    /// Role code of the first contributor in billing order.
    PrimaryContributorRole,
    /// Price amount for one territory, e.g. "19.99".
    PriceForTerritory { territory: String },
    /// Currency code for one territory, e.g. "USD".
    CurrencyForTerritory { territory: String },
    /// BISAC subject code at a billing position, zero-based.
    BisacCode { index: usize },
    /// Thema subject code at a billing position, zero-based.
    ThemaCode { index: usize },
    /// Rendered file path from the configured template for a logical
    /// asset name ("cover", "interior"), with `{isbn}` and `{title}`
    /// placeholders filled from metadata. Without a configured template
    /// the metadata's own `<asset>_path` attribute is used.
    AssetPath { asset: String },
}

impl ComputedField {
    /// Evaluate the derivation. Missing inputs produce an empty string.
    pub fn evaluate(&self, metadata: &BookMetadata, config: &EffectiveConfig) -> String {
        match self {
            Self::SpineWidthMm => spine_width_mm(metadata),
            Self::FullTitle => match &metadata.subtitle {
                Some(subtitle) if !subtitle.is_empty() => {
                    format!("{}: {}", metadata.title, subtitle)
                }
                _ => metadata.title.clone(),
            },
            Self::ContributorDisplay => metadata
                .contributors
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            Self::PrimaryContributorName => metadata
                .primary_contributor()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            Self::PrimaryContributorRole => metadata
                .primary_contributor()
                .map(|c| c.role.clone())
                .unwrap_or_default(),
            Self::PriceForTerritory { territory } => metadata
                .price_for(territory)
                .map(|p| p.amount.clone())
                .unwrap_or_default(),
            Self::CurrencyForTerritory { territory } => metadata
                .price_for(territory)
                .map(|p| p.currency.clone())
                .unwrap_or_default(),
            Self::BisacCode { index } => {
                metadata.bisac_codes.get(*index).cloned().unwrap_or_default()
            }
            Self::ThemaCode { index } => {
                metadata.thema_codes.get(*index).cloned().unwrap_or_default()
            }
            Self::AssetPath { asset } => match config.file_path_template(asset) {
                Some(template) => render_path_template(template, metadata),
                None => metadata
                    .direct_field(&format!("{}_path", asset))
                    .unwrap_or_default(),
            },
        }
    }
}

/// Spine width in millimetres, two decimal places.
fn spine_width_mm(metadata: &BookMetadata) -> String {
    if metadata.physical.page_count == 0 {
        return String::new();
    }

    let ppi = metadata
        .physical
        .paper_stock
        .as_deref()
        .and_then(|stock| {
            PAPER_STOCK_PPI
                .iter()
                .find(|(name, _)| *name == stock)
                .map(|(_, ppi)| *ppi)
        })
        .unwrap_or(DEFAULT_PPI);

    let mm = f64::from(metadata.physical.page_count) / ppi * MM_PER_INCH;
    format!("{:.2}", mm)
}

/// Fill `{isbn}` and `{title}` placeholders in a path template.
fn render_path_template(template: &str, metadata: &BookMetadata) -> String {
    template
        .replace("{isbn}", metadata.isbn13.as_deref().unwrap_or(""))
        .replace("{title}", &metadata.title)
}

/// One rule for producing a single output column's value.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingStrategy {
    /// Copy one metadata attribute by its direct-field name.
    ///
    /// A configuration value under the same key wins over the metadata
    /// attribute - this is how a tranche (or a per-book schedule
    /// override) pins an attribute such as the subtitle for every book
    /// it covers. An explicit empty configuration value suppresses the
    /// attribute entirely.
    Direct { field: String },
    /// Derive from one or more metadata attributes.
    Computed(ComputedField),
    /// Choose between two literals depending on another attribute.
    Conditional {
        /// Direct-field name to test.
        field: String,
        /// Value to compare against (missing attributes compare as "").
        equals: String,
        then_value: String,
        else_value: String,
    },
    /// Static fallback value.
    Default { value: String },
    /// Delegate to the completion service.
    ///
    /// The registry checks the metadata completion cache and then the
    /// optional direct field before invoking the completer; `fallback`
    /// is used when completion fails persistently.
    LlmCompletion {
        metadata_field: Option<String>,
        prompt_template: String,
        fallback: String,
    },
}

impl MappingStrategy {
    /// The origin tag recorded for values this strategy produces.
    pub fn origin(&self) -> ValueOrigin {
        match self {
            Self::Direct { .. } => ValueOrigin::Direct,
            Self::Computed(_) => ValueOrigin::Computed,
            Self::Conditional { .. } => ValueOrigin::Conditional,
            Self::Default { .. } => ValueOrigin::Default,
            Self::LlmCompletion { .. } => ValueOrigin::LlmCompletion,
        }
    }

    /// Evaluate the non-completion strategies.
    ///
    /// Returns `None` for [`MappingStrategy::LlmCompletion`], whose
    /// evaluation is asynchronous and owned by the registry.
    pub fn evaluate_sync(
        &self,
        metadata: &BookMetadata,
        config: &EffectiveConfig,
    ) -> Option<String> {
        match self {
            Self::Direct { field } => Some(
                config
                    .get(field)
                    .map(str::to_string)
                    .or_else(|| metadata.direct_field(field))
                    .unwrap_or_default(),
            ),
            Self::Computed(computed) => Some(computed.evaluate(metadata, config)),
            Self::Conditional {
                field,
                equals,
                then_value,
                else_value,
            } => {
                let actual = metadata.direct_field(field).unwrap_or_default();
                if actual == *equals {
                    Some(then_value.clone())
                } else {
                    Some(else_value.clone())
                }
            }
            Self::Default { value } => Some(value.clone()),
            Self::LlmCompletion { .. } => None,
        }
    }
}

/// Render an LLM prompt template for one book.
///
/// Supports `{field}`, `{title}` and `{contributor}` placeholders.
pub(crate) fn render_prompt(template: &str, field_name: &str, metadata: &BookMetadata) -> String {
    template
        .replace("{field}", field_name)
        .replace("{title}", &metadata.title)
        .replace(
            "{contributor}",
            metadata
                .primary_contributor()
                .map(|c| c.name.as_str())
                .unwrap_or(""),
        )
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
