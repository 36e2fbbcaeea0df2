use std::cmp::Ordering;

use crate::models::{CandidateItem, Category, SelectedItem};
use crate::services::budget::round2;
use crate::services::links;

/// Candidates may exceed the category cap by this factor
pub const PRICE_TOLERANCE: f64 = 1.10;

/// A cheaper alternative costs at most this share of the chosen price
pub const CHEAPER_RATIO: f64 = 0.85;

/// Merchant label on placeholder items
pub const PLACEHOLDER_MERCHANT: &str = "n/a";

/// Outcome of scoring one category's candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub chosen: &'a CandidateItem,
    pub cheaper: Option<&'a CandidateItem>,
}

/// Picks the candidate priced closest to `cap`, plus a cheaper alternative
///
/// Only positively priced candidates count. Those within the 10% tolerance
/// form the pool; when none are, every priced candidate does. Ties go to the
/// earliest candidate. Returns `None` when no candidate has a price.
pub fn select(candidates: &[CandidateItem], cap: f64) -> Option<Selection<'_>> {
    let priced: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.price_value()))
        .filter(|(_, price)| *price > 0.0)
        .collect();

    let within: Vec<(usize, f64)> = priced
        .iter()
        .copied()
        .filter(|(_, price)| *price <= cap * PRICE_TOLERANCE)
        .collect();

    let pool = if within.is_empty() { priced } else { within };

    let (chosen_idx, chosen_price) = pool.iter().copied().min_by(|a, b| {
        (a.1 - cap)
            .abs()
            .partial_cmp(&(b.1 - cap).abs())
            .unwrap_or(Ordering::Equal)
    })?;

    let threshold = chosen_price * CHEAPER_RATIO;
    let cheaper = pool
        .iter()
        .copied()
        .filter(|(i, price)| *i != chosen_idx && *price <= threshold)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(i, _)| &candidates[i]);

    Some(Selection {
        chosen: &candidates[chosen_idx],
        cheaper,
    })
}

/// Drops candidates whose title mentions an avoided material
pub fn exclude_materials(candidates: Vec<CandidateItem>, avoided: &[String]) -> Vec<CandidateItem> {
    if avoided.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|c| {
            let title = c.title.to_lowercase();
            !avoided.iter().any(|m| title.contains(m.as_str()))
        })
        .collect()
}

/// Turns a chosen candidate into a display item with a resolved link
pub fn to_selected(
    item: &CandidateItem,
    link: String,
    fallback_currency: &str,
    cheaper: Option<&CandidateItem>,
) -> SelectedItem {
    SelectedItem {
        category: item.category,
        title: display_title(&item.title),
        price: round2(item.price_value()),
        currency: item
            .currency
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| fallback_currency.to_string()),
        link,
        image: item.thumbnail.clone(),
        merchant: item
            .source
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_default(),
        cheaper_alternative: cheaper.map(clickable_alternative),
    }
}

/// Stand-in for a category without usable candidates, linking to a web search
pub fn placeholder(category: Category, cap: f64, currency: &str, query: &str) -> SelectedItem {
    SelectedItem {
        category,
        title: format!("No match found ({})", category),
        price: round2(cap),
        currency: currency.to_string(),
        link: links::search_url(query),
        image: None,
        merchant: PLACEHOLDER_MERCHANT.to_string(),
        cheaper_alternative: None,
    }
}

/// Listing titles often carry "| Brand | Shop" suffixes
fn display_title(title: &str) -> String {
    let head = title.split('|').next().unwrap_or_default().trim();
    if head.is_empty() {
        title.trim().to_string()
    } else {
        head.to_string()
    }
}

fn clickable_alternative(item: &CandidateItem) -> CandidateItem {
    let link = links::normalize_link(
        item.link.as_deref(),
        &item.title,
        item.source.as_deref().unwrap_or_default(),
    );
    CandidateItem {
        link: Some(link),
        ..item.clone()
    }
}
