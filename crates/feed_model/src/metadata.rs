//! Book metadata as received from upstream ingestion.
//!
//! A `BookMetadata` value is created once per book, flows once through
//! mapping and validation, and is never mutated by the pipeline. The one
//! exception is the `llm_completions` cache, which upstream tooling may
//! populate with already-generated field values so the mapping layer can
//! skip the external completion call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single contributor credit, in billing order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Contributor {
    /// Display name, e.g. "Jane Q. Author".
    pub name: String,
    /// Distributor role code, e.g. "A01" for author, "B01" for editor.
    pub role: String,
    /// Optional short biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
}

/// Retail price for one sales territory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TerritoryPrice {
    /// Territory code, e.g. "US" or "UK".
    pub territory: String,
    /// Decimal amount rendered as a string, e.g. "19.99".
    pub amount: String,
    /// Currency code, e.g. "USD".
    pub currency: String,
}

/// Physical production specs for a print title.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PhysicalSpecs {
    pub page_count: u32,
    pub trim_width_mm: Option<f64>,
    pub trim_height_mm: Option<f64>,
    /// Paper stock name used for spine width lookup, e.g. "creme-50lb".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_stock: Option<String>,
}

/// Full bibliographic and production data for one book.
///
/// Field names here are the names accepted by [`BookMetadata::direct_field`],
/// which backs the direct mapping strategies.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BookMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Contributors in billing order.
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    /// ISBN-13 as a 13-digit string, when assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    /// Per-territory retail prices.
    #[serde(default)]
    pub prices: Vec<TerritoryPrice>,
    #[serde(default)]
    pub bisac_codes: Vec<String>,
    #[serde(default)]
    pub thema_codes: Vec<String>,
    pub physical: PhysicalSpecs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Publication date in YYYYMMDD form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_path: Option<String>,
    /// Cache of field values already generated by the completion service,
    /// keyed by output column name. Checked before any external call.
    #[serde(default)]
    pub llm_completions: HashMap<String, String>,
}

impl BookMetadata {
    /// Look up a metadata attribute by its direct-mapping name.
    ///
    /// Returns `None` for unknown names and for attributes that are not
    /// set on this book. Multi-valued attributes (codes, prices,
    /// contributors) are not reachable here - they are derived through
    /// computed strategies instead.
    pub fn direct_field(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "subtitle" => self.subtitle.clone(),
            "isbn13" => self.isbn13.clone(),
            "short_description" => self.short_description.clone(),
            "long_description" => self.long_description.clone(),
            "publication_date" => self.publication_date.clone(),
            "series_name" => self.series_name.clone(),
            "cover_path" => self.cover_path.clone(),
            "interior_path" => self.interior_path.clone(),
            "page_count" => Some(self.physical.page_count.to_string()),
            "paper_stock" => self.physical.paper_stock.clone(),
            "primary_contributor_biography" => self
                .contributors
                .first()
                .and_then(|c| c.biography.clone()),
            _ => None,
        }
    }

    /// The first contributor in billing order, if any.
    pub fn primary_contributor(&self) -> Option<&Contributor> {
        self.contributors.first()
    }

    /// Price entry for a territory code, if one was supplied.
    pub fn price_for(&self, territory: &str) -> Option<&TerritoryPrice> {
        self.prices.iter().find(|p| p.territory == territory)
    }
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
