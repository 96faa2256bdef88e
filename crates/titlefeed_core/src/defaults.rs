//! Standard distributor column wiring.
//!
//! The distributor's full submission template is loaded from its header
//! file at run time; the functions here register the mapping strategies
//! and validators for the columns TitleFeed knows how to fill. Columns in
//! the schema with no registered strategy are emitted empty, which is
//! what the distributor expects for fields a publisher does not use.

use config_manager::EffectiveConfig;
use feed_model::ColumnSchema;
use field_mapper::{ComputedField, FieldMappingRegistry, MappingStrategy};
use llm_client::FieldCompleter;
use std::sync::Arc;
use validation::{
    ByteLengthValidator, CodeListValidator, CodeSet, DateValidator, FileNamingValidator,
    IsbnValidator, PriceValidator, ValidationPipeline,
};

/// Byte ceiling on the short description field.
pub const SHORT_DESCRIPTION_MAX_BYTES: usize = 350;

/// Column names shared between mapping and validation wiring.
pub mod columns {
    pub const ISBN: &str = "ISBN";
    pub const TITLE: &str = "Title";
    pub const SUBTITLE: &str = "Subtitle";
    pub const FULL_TITLE: &str = "Full Title";
    pub const CONTRIBUTOR_ONE: &str = "Contributor One";
    pub const CONTRIBUTOR_ONE_ROLE: &str = "Contributor One Role";
    pub const CONTRIBUTOR_ONE_BIO: &str = "Contributor One Bio";
    pub const CONTRIBUTORS: &str = "Contributors";
    pub const SERIES_NAME: &str = "Series Name";
    pub const BISAC_SUBJECT_1: &str = "BISAC Subject 1";
    pub const BISAC_SUBJECT_2: &str = "BISAC Subject 2";
    pub const THEMA_SUBJECT_1: &str = "Thema Subject 1";
    pub const PUB_DATE: &str = "Pub Date";
    pub const PAGE_COUNT: &str = "Page Count";
    pub const SPINE_WIDTH_MM: &str = "Spine Width MM";
    pub const COVER_LAMINATION: &str = "Cover Lamination";
    pub const US_PRICE: &str = "US Price";
    pub const US_CURRENCY: &str = "US Currency";
    pub const UK_PRICE: &str = "UK Price";
    pub const UK_CURRENCY: &str = "UK Currency";
    pub const SHORT_DESCRIPTION: &str = "Short Description";
    pub const LONG_DESCRIPTION: &str = "Long Description";
    pub const COVER_FILE_PATH: &str = "Cover File Path";
    pub const INTERIOR_FILE_PATH: &str = "Interior File Path";
    pub const DISCOUNT_CODE: &str = "Discount Code";
    pub const RETURNABLE: &str = "Returnable";
}

/// The built-in column schema, used when no template header file is
/// supplied. The real distributor template is a superset; emission
/// against it simply leaves the extra columns empty.
pub fn standard_schema() -> ColumnSchema {
    use columns::*;

    ColumnSchema::new([
        ISBN,
        TITLE,
        SUBTITLE,
        FULL_TITLE,
        CONTRIBUTOR_ONE,
        CONTRIBUTOR_ONE_ROLE,
        CONTRIBUTOR_ONE_BIO,
        CONTRIBUTORS,
        SERIES_NAME,
        BISAC_SUBJECT_1,
        BISAC_SUBJECT_2,
        THEMA_SUBJECT_1,
        PUB_DATE,
        PAGE_COUNT,
        SPINE_WIDTH_MM,
        COVER_LAMINATION,
        US_PRICE,
        US_CURRENCY,
        UK_PRICE,
        UK_CURRENCY,
        SHORT_DESCRIPTION,
        LONG_DESCRIPTION,
        COVER_FILE_PATH,
        INTERIOR_FILE_PATH,
        DISCOUNT_CODE,
        RETURNABLE,
    ])
    .expect("built-in schema is well formed")
}

/// Register the standard mapping strategies.
pub fn standard_registry(completer: Arc<dyn FieldCompleter>) -> FieldMappingRegistry {
    use columns::*;

    let direct = |field: &str| MappingStrategy::Direct {
        field: field.to_string(),
    };

    let mut registry = FieldMappingRegistry::new(completer);

    registry.register(ISBN, direct("isbn13"));
    registry.register(TITLE, direct("title"));
    registry.register(SUBTITLE, direct("subtitle"));
    registry.register(FULL_TITLE, MappingStrategy::Computed(ComputedField::FullTitle));
    registry.register(
        CONTRIBUTOR_ONE,
        MappingStrategy::Computed(ComputedField::PrimaryContributorName),
    );
    registry.register(
        CONTRIBUTOR_ONE_ROLE,
        MappingStrategy::Computed(ComputedField::PrimaryContributorRole),
    );
    registry.register(
        CONTRIBUTOR_ONE_BIO,
        MappingStrategy::LlmCompletion {
            metadata_field: Some("primary_contributor_biography".to_string()),
            prompt_template:
                "Write a one-sentence professional biography of {contributor}, \
                 the author of \"{title}\"."
                    .to_string(),
            fallback: String::new(),
        },
    );
    registry.register(
        CONTRIBUTORS,
        MappingStrategy::Computed(ComputedField::ContributorDisplay),
    );
    registry.register(
        SERIES_NAME,
        MappingStrategy::LlmCompletion {
            metadata_field: Some("series_name".to_string()),
            prompt_template:
                "Suggest a concise series name for the book \"{title}\". \
                 Reply with the name only."
                    .to_string(),
            fallback: String::new(),
        },
    );
    registry.register(
        BISAC_SUBJECT_1,
        MappingStrategy::Computed(ComputedField::BisacCode { index: 0 }),
    );
    registry.register(
        BISAC_SUBJECT_2,
        MappingStrategy::Computed(ComputedField::BisacCode { index: 1 }),
    );
    registry.register(
        THEMA_SUBJECT_1,
        MappingStrategy::Computed(ComputedField::ThemaCode { index: 0 }),
    );
    registry.register(PUB_DATE, direct("publication_date"));
    registry.register(PAGE_COUNT, direct("page_count"));
    registry.register(
        SPINE_WIDTH_MM,
        MappingStrategy::Computed(ComputedField::SpineWidthMm),
    );
    registry.register(
        COVER_LAMINATION,
        MappingStrategy::Conditional {
            field: "paper_stock".to_string(),
            equals: "creme-50lb".to_string(),
            then_value: "Matte".to_string(),
            else_value: "Gloss".to_string(),
        },
    );
    registry.register(
        US_PRICE,
        MappingStrategy::Computed(ComputedField::PriceForTerritory {
            territory: "US".to_string(),
        }),
    );
    registry.register(
        US_CURRENCY,
        MappingStrategy::Computed(ComputedField::CurrencyForTerritory {
            territory: "US".to_string(),
        }),
    );
    registry.register(
        UK_PRICE,
        MappingStrategy::Computed(ComputedField::PriceForTerritory {
            territory: "UK".to_string(),
        }),
    );
    registry.register(
        UK_CURRENCY,
        MappingStrategy::Computed(ComputedField::CurrencyForTerritory {
            territory: "UK".to_string(),
        }),
    );
    registry.register(
        SHORT_DESCRIPTION,
        MappingStrategy::LlmCompletion {
            metadata_field: Some("short_description".to_string()),
            prompt_template:
                "Write a short retail description (at most 300 characters) \
                 for the book \"{title}\"."
                    .to_string(),
            fallback: String::new(),
        },
    );
    registry.register(LONG_DESCRIPTION, direct("long_description"));
    registry.register(
        COVER_FILE_PATH,
        MappingStrategy::Computed(ComputedField::AssetPath {
            asset: "cover".to_string(),
        }),
    );
    registry.register(
        INTERIOR_FILE_PATH,
        MappingStrategy::Computed(ComputedField::AssetPath {
            asset: "interior".to_string(),
        }),
    );
    registry.register(
        DISCOUNT_CODE,
        MappingStrategy::Default {
            value: "STD".to_string(),
        },
    );
    registry.register(
        RETURNABLE,
        MappingStrategy::Default {
            value: "N".to_string(),
        },
    );

    registry
}

/// Build the standard validation pipeline.
///
/// File-naming rules are only added for assets the effective
/// configuration carries a path template for.
pub fn standard_validation(
    bisac: Arc<CodeSet>,
    thema: Arc<CodeSet>,
    config: &EffectiveConfig,
) -> ValidationPipeline {
    use columns::*;

    let mut pipeline = ValidationPipeline::new()
        .with(Box::new(IsbnValidator::new(ISBN)))
        .with(Box::new(CodeListValidator::new(
            BISAC_SUBJECT_1,
            Arc::clone(&bisac),
        )))
        .with(Box::new(CodeListValidator::new(BISAC_SUBJECT_2, bisac)))
        .with(Box::new(CodeListValidator::new(THEMA_SUBJECT_1, thema)))
        .with(Box::new(DateValidator::new(PUB_DATE)))
        .with(Box::new(PriceValidator::new(US_PRICE, US_CURRENCY)))
        .with(Box::new(PriceValidator::new(UK_PRICE, UK_CURRENCY)));

    if let Some(template) = config.file_path_template("cover") {
        pipeline = pipeline.with(Box::new(FileNamingValidator::new(
            COVER_FILE_PATH,
            ISBN,
            template,
        )));
    }
    if let Some(template) = config.file_path_template("interior") {
        pipeline = pipeline.with(Box::new(FileNamingValidator::new(
            INTERIOR_FILE_PATH,
            ISBN,
            template,
        )));
    }

    pipeline.with(Box::new(ByteLengthValidator::new(
        SHORT_DESCRIPTION,
        SHORT_DESCRIPTION_MAX_BYTES,
    )))
}

#[cfg(test)]
#[path = "defaults_tests.rs"]
mod tests;
