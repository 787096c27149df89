//! Print Configuration Model
//!
//! The priceable description of one print job. Created once at order
//! submission and immutable afterwards — a correction means a new order.

use serde::{Deserialize, Serialize};

/// Format class: small sheet formats vs. large-format (banner/poster) jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum FormatClass {
    /// Small format (A-series sheets)
    Petit,
    /// Large format, physical dimensions required
    Grand,
}

/// Small-format sheet size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum SmallFormat {
    A5,
    A4,
    A3,
    #[serde(rename = "custom")]
    #[cfg_attr(feature = "db", sqlx(rename = "custom"))]
    Custom,
}

/// Paper stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaperType {
    Glace,
    Mat,
}

/// Surface finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Finish {
    Brillant,
    Mate,
    Standard,
}

/// Single- or double-sided printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum DuplexMode {
    Recto,
    RectoVerso,
}

/// Binding type for bound documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum BindingType {
    Spirale,
    Agrafe,
    DosCarreColle,
}

/// Cover paper stock for books
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum CoverPaper {
    Simple,
    Rigide,
}

/// Print configuration entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PrintConfiguration {
    pub id: Option<i64>,
    pub format_class: FormatClass,
    pub small_format: Option<SmallFormat>,
    /// Physical width in cm (large format only, <= 160)
    pub width_cm: Option<f64>,
    /// Physical height in cm (large format only, <= 100)
    pub height_cm: Option<f64>,
    pub paper_type: Option<PaperType>,
    pub finish: Option<Finish>,
    pub duplex: Option<DuplexMode>,
    pub binding: Option<BindingType>,
    pub cover_paper: Option<CoverPaper>,
    pub quantity: i64,
    pub is_book: bool,
    /// Required iff `is_book`
    pub book_pages: Option<i64>,
    /// Free-text options
    pub options: Option<String>,
    /// Catalog product reference, mandatory unless `is_book`
    pub product_id: Option<i64>,
}

/// Print configuration payload as submitted with a new order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrintConfigurationInput {
    pub format_class: Option<FormatClass>,
    pub small_format: Option<SmallFormat>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub paper_type: Option<PaperType>,
    pub finish: Option<Finish>,
    pub duplex: Option<DuplexMode>,
    pub binding: Option<BindingType>,
    pub cover_paper: Option<CoverPaper>,
    pub quantity: i64,
    #[serde(default)]
    pub is_book: bool,
    pub book_pages: Option<i64>,
    pub options: Option<String>,
    pub product_id: Option<i64>,
}

impl PrintConfigurationInput {
    /// Build the entity to persist. Assumes the input has been validated;
    /// a missing format class defaults to small format.
    pub fn into_config(self) -> PrintConfiguration {
        PrintConfiguration {
            id: None,
            format_class: self.format_class.unwrap_or(FormatClass::Petit),
            small_format: self.small_format,
            width_cm: self.width_cm,
            height_cm: self.height_cm,
            paper_type: self.paper_type,
            finish: self.finish,
            duplex: self.duplex,
            binding: self.binding,
            cover_paper: self.cover_paper,
            quantity: self.quantity,
            is_book: self.is_book,
            book_pages: self.book_pages,
            options: self.options,
            product_id: self.product_id,
        }
    }
}
