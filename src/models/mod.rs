use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod intake;
pub mod outfit;

pub use intake::{Gender, GenerateRequest, Intake, Mode, Style};
pub use outfit::{Allocation, EngineResult, OutfitBundle, Palette, SelectedItem};

/// Number of garment slots
pub const CATEGORY_COUNT: usize = 7;

/// Garment slot an item fills in an outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Outer,
    Top1,
    Top2,
    Bottom,
    Shoes,
    Tee,
    Accessory,
}

impl Category {
    /// Every category, in processing order
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Outer,
        Category::Top1,
        Category::Top2,
        Category::Bottom,
        Category::Shoes,
        Category::Tee,
        Category::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Outer => "outer",
            Category::Top1 => "top1",
            Category::Top2 => "top2",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Tee => "tee",
            Category::Accessory => "accessory",
        }
    }

    /// Position in [`Category::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price as delivered by a catalog: either a number or a currency string like "€39,99"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    /// Numeric value of the price; unparsable text yields 0
    pub fn value(&self) -> f64 {
        match self {
            RawPrice::Number(n) if n.is_finite() => *n,
            RawPrice::Number(_) => 0.0,
            RawPrice::Text(text) => parse_price_text(text),
        }
    }
}

/// Strips everything but digits and separators, then reads the last separator as decimal
fn parse_price_text(text: &str) -> f64 {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let normalized = match (kept.rfind('.'), kept.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => kept.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => kept.replace(',', ""),
        (None, Some(_)) => kept.replace(',', "."),
        (Some(_), None) if kept.matches('.').count() > 1 => kept.replace('.', ""),
        _ => kept,
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// A raw search result or catalog entry before selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub title: String,
    pub price: Option<RawPrice>,
    pub currency: Option<String>,
    pub link: Option<String>,
    /// Merchant name
    pub source: Option<String>,
    pub thumbnail: Option<String>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl CandidateItem {
    pub fn price_value(&self) -> f64 {
        self.price.as_ref().map(RawPrice::value).unwrap_or(0.0)
    }
}

/// Country-specific locale parameters for the shopping search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Google country code (gl)
    pub gl: &'static str,
    /// Google interface language (hl)
    pub hl: &'static str,
}

// ============================================================================
// SerpAPI Types
// ============================================================================

/// Response from the google_shopping engine
#[derive(Debug, Deserialize)]
pub struct ShoppingResponse {
    #[serde(default)]
    pub shopping_results: Option<Vec<ShoppingResult>>,
}

/// Single google_shopping result; only the fields we read are declared
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub extracted_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub product_link: Option<String>,
    #[serde(default)]
    pub product_page_url: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub redirect_link: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
}

impl ShoppingResult {
    /// Link fields in order of preference
    pub fn link_fields(&self) -> [Option<&str>; 7] {
        [
            self.link.as_deref(),
            self.product_link.as_deref(),
            self.product_page_url.as_deref(),
            self.product_url.as_deref(),
            self.source_url.as_deref(),
            self.redirect_link.as_deref(),
            self.url.as_deref(),
        ]
    }
}

/// Response from the google_shopping_product engine
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    pub sellers_results: Option<Vec<SellerResult>>,
}

/// One seller offering a product
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SellerResult {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
}

impl SellerResult {
    /// Store name, whichever field the payload used
    pub fn store_name(&self) -> Option<&str> {
        self.source
            .as_deref()
            .or(self.seller.as_deref())
            .or(self.store.as_deref())
    }
}
