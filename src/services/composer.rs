use std::collections::BTreeMap;

use crate::models::{Category, OutfitBundle, SelectedItem};

/// Category lists that make up each outfit, in presentation order
pub const OUTFIT_TEMPLATES: [&[Category]; 3] = [
    &[
        Category::Outer,
        Category::Top1,
        Category::Bottom,
        Category::Shoes,
        Category::Accessory,
    ],
    &[Category::Top2, Category::Bottom, Category::Shoes, Category::Tee],
    &[Category::Outer, Category::Top2, Category::Bottom, Category::Shoes],
];

/// Assembles up to `count` outfits from the selected items
///
/// Categories without a selection are skipped. Totals are summed in whole
/// cents so they always equal the sum of the displayed item prices.
pub fn compose(
    selected: &BTreeMap<Category, SelectedItem>,
    count: usize,
    currency: &str,
) -> Vec<OutfitBundle> {
    OUTFIT_TEMPLATES
        .iter()
        .take(count)
        .enumerate()
        .map(|(idx, template)| {
            let items: Vec<SelectedItem> = template
                .iter()
                .filter_map(|category| selected.get(category).cloned())
                .collect();

            let total_cents = items
                .iter()
                .map(|item| to_cents(item.price))
                .fold(0i64, i64::saturating_add);
            let currency = items
                .first()
                .map(|item| item.currency.clone())
                .unwrap_or_else(|| currency.to_string());

            OutfitBundle {
                name: format!("Outfit {}", idx + 1),
                items,
                total: total_cents as f64 / 100.0,
                currency,
            }
        })
        .collect()
}

fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}
