use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Largest budget, total or per item, an intake may ask for
pub const MAX_BUDGET: f64 = 1_000_000.0;

/// Gender the outfits are assembled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Unisex,
    NonBinary,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unisex => "unisex",
            Gender::NonBinary => "non-binary",
        }
    }
}

/// Style tag from the fixed vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Minimalistisch,
    Casual,
    Klassiek,
    Sportief,
    Creatief,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Minimalistisch => "minimalistisch",
            Style::Casual => "casual",
            Style::Klassiek => "klassiek",
            Style::Sportief => "sportief",
            Style::Creatief => "creatief",
        }
    }
}

impl FromStr for Style {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimalistisch" => Ok(Style::Minimalistisch),
            "casual" => Ok(Style::Casual),
            "klassiek" => Ok(Style::Klassiek),
            "sportief" => Ok(Style::Sportief),
            "creatief" => Ok(Style::Creatief),
            other => Err(AppError::InvalidInput(format!("Unknown style: {}", other))),
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where candidates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Static in-memory catalog
    Demo,
    /// Live Google Shopping search through SerpAPI
    Serpapi,
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demo" => Ok(Mode::Demo),
            "serpapi" => Ok(Mode::Serpapi),
            other => Err(AppError::InvalidInput(format!("Unknown mode: {}", other))),
        }
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The user's style questionnaire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intake {
    /// What the outfits are for (work, leisure, event, ...)
    pub purpose: String,
    pub styles: Vec<String>,
    pub gender: Gender,
    #[serde(default)]
    pub fit: Option<String>,
    pub country: String,
    /// Overrides the currency derived from the country
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub budget_total: Option<f64>,
    #[serde(default)]
    pub budget_per_item: Option<f64>,
    #[serde(default)]
    pub favorite_colors: Option<Vec<String>>,
    #[serde(default)]
    pub materials_avoid: Option<Vec<String>>,
    #[serde(default)]
    pub accessibility: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub sustainability_preference: Option<bool>,
}

impl Intake {
    /// Rejects intakes the engine cannot work with
    pub fn validate(&self) -> AppResult<()> {
        if self.purpose.trim().is_empty() {
            return Err(AppError::InvalidInput("purpose cannot be empty".to_string()));
        }

        if self.styles.iter().all(|s| s.trim().is_empty()) {
            return Err(AppError::InvalidInput(
                "at least one style is required".to_string(),
            ));
        }

        let country = self.country.trim();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::InvalidInput(format!(
                "country must be a 2-letter code, got '{}'",
                self.country
            )));
        }

        for (name, budget) in [
            ("budget_total", self.budget_total),
            ("budget_per_item", self.budget_per_item),
        ] {
            if let Some(value) = budget {
                if !value.is_finite() || value <= 0.0 {
                    return Err(AppError::InvalidInput(format!(
                        "{} must be a positive number",
                        name
                    )));
                }
                if value > MAX_BUDGET {
                    return Err(AppError::InvalidInput(format!(
                        "{} cannot exceed {}",
                        name, MAX_BUDGET
                    )));
                }
            }
        }

        Ok(())
    }

    /// Upper-cased two-letter country code
    pub fn country_code(&self) -> String {
        self.country.trim().to_uppercase()
    }

    /// Whether an accessibility flag is set to a truthy value
    pub fn accessibility_flag(&self, name: &str) -> bool {
        self.accessibility
            .as_ref()
            .and_then(|flags| flags.get(name))
            .map(is_truthy)
            .unwrap_or(false)
    }

    pub fn prefers_sustainable(&self) -> bool {
        self.sustainability_preference.unwrap_or(false)
    }

    /// Materials to avoid, lower-cased, blanks dropped
    pub fn avoided_materials(&self) -> Vec<String> {
        self.materials_avoid
            .iter()
            .flatten()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            !matches!(s.as_str(), "" | "false" | "no" | "0" | "off")
        }
        _ => false,
    }
}

/// Body of the generate endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub intake: Intake,
    /// Explicit mode; when absent it follows credential presence
    #[serde(default)]
    pub mode: Option<Mode>,
    /// Per-request SerpAPI key overriding the server's key
    #[serde(default)]
    pub serpapi_api_key: Option<String>,
    #[serde(default = "default_outfits_count")]
    pub outfits_count: usize,
}

fn default_outfits_count() -> usize {
    3
}
