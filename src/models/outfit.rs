use serde::{ser::SerializeMap, Serialize, Serializer};

use super::{CandidateItem, Category, Mode, CATEGORY_COUNT};

/// Working color palette, favorites first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub colors: Vec<String>,
}

impl Palette {
    pub fn contains(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c.eq_ignore_ascii_case(color))
    }
}

/// Budget per category plus the resolved total
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    amounts: [f64; CATEGORY_COUNT],
    total: f64,
}

impl Allocation {
    pub fn new(amounts: [f64; CATEGORY_COUNT], total: f64) -> Self {
        Self { amounts, total }
    }

    /// Amount allotted to a category
    pub fn get(&self, category: Category) -> f64 {
        self.amounts[category.index()]
    }

    /// Resolved total budget (not the sum of floored amounts)
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

impl Serialize for Allocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CATEGORY_COUNT + 1))?;
        for (category, amount) in self.iter() {
            map.serialize_entry(category.as_str(), &amount)?;
        }
        map.serialize_entry("_total", &self.total)?;
        map.end()
    }
}

/// Candidate chosen for a category, normalized for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedItem {
    pub category: Category,
    pub title: String,
    pub price: f64,
    pub currency: String,
    pub link: String,
    pub image: Option<String>,
    pub merchant: String,
    pub cheaper_alternative: Option<CandidateItem>,
}

/// A named, priced group of selected items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitBundle {
    pub name: String,
    pub items: Vec<SelectedItem>,
    pub total: f64,
    pub currency: String,
}

/// Everything one generation call returns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineResult {
    pub palette: Palette,
    pub allocation: Allocation,
    pub outfits: Vec<OutfitBundle>,
    pub explanation: String,
    pub independent_note: String,
    pub country: String,
    pub currency: String,
    pub mode: Mode,
}
