use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::models::{Category, Intake, Palette, Style};
use crate::services::presets;

/// Only this many leading palette colors are used in queries
const QUERY_COLORS: usize = 3;

/// Builds one search query per category
///
/// Randomness only comes from `rng`, so a generator seeded the same way yields
/// the same queries. Categories draw in their fixed order.
pub struct QueryBuilder<'a> {
    intake: &'a Intake,
    styles: &'a [Style],
    palette: &'a Palette,
    site_filters: bool,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(intake: &'a Intake, styles: &'a [Style], palette: &'a Palette) -> Self {
        Self {
            intake,
            styles,
            palette,
            site_filters: false,
        }
    }

    /// Restrict queries to the country's retailer domains (live search only)
    pub fn with_site_filters(mut self, enabled: bool) -> Self {
        self.site_filters = enabled;
        self
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> BTreeMap<Category, String> {
        let colors: Vec<&str> = self
            .palette
            .colors
            .iter()
            .take(QUERY_COLORS)
            .map(String::as_str)
            .collect();
        let gender = presets::gender_terms(self.intake.gender)[0];
        let suffix = self.suffix();

        Category::ALL
            .iter()
            .map(|category| {
                let color = colors.choose(rng).copied().unwrap_or_default();
                let terms = self.keyword_pool(*category);
                let term = terms.choose(rng).copied().unwrap_or_default();

                let core = [gender, term, color]
                    .iter()
                    .filter(|part| !part.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ");

                (*category, format!("{}{}", core, suffix))
            })
            .collect()
    }

    /// Base keywords plus the modifiers of every active style
    fn keyword_pool(&self, category: Category) -> Vec<&'static str> {
        let mut terms = presets::category_keywords(category).to_vec();
        for style in self.styles {
            terms.extend_from_slice(presets::style_modifiers(*style, category));
        }
        terms
    }

    /// Site filters, fit and accessibility words shared by every category
    fn suffix(&self) -> String {
        let mut suffix = String::new();

        if self.site_filters {
            let shops = presets::country_shops(&self.intake.country_code());
            let filters = shops
                .iter()
                .map(|domain| format!("site:{}", domain))
                .collect::<Vec<_>>()
                .join(" OR ");
            suffix.push_str(&format!(" ({})", filters));
        }

        if let Some(fit) = self.intake.fit.as_deref().map(str::trim) {
            if !fit.is_empty() {
                suffix.push(' ');
                suffix.push_str(&fit.to_lowercase());
            }
        }

        let words = self.descriptor_words();
        if !words.is_empty() {
            suffix.push(' ');
            suffix.push_str(&words.join(" "));
        }

        suffix
    }

    fn descriptor_words(&self) -> Vec<&'static str> {
        let mut words = Vec::new();
        if self.intake.accessibility_flag("easy_closures") {
            words.extend(["magnetic", "snap", "easy closure"]);
        }
        if self.intake.accessibility_flag("elastic_waist") || self.intake.accessibility_flag("pull_on")
        {
            words.extend(["elastic waist", "pull-on"]);
        }
        if self.intake.accessibility_flag("soft_fabrics") {
            words.extend(["soft", "brushed", "stretch"]);
        }
        if self.intake.prefers_sustainable() {
            words.push("sustainable");
        }
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::palette::{normalize_styles, resolve_palette};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn intake(extra: serde_json::Value) -> Intake {
        let mut value = json!({
            "purpose": "work",
            "styles": ["casual"],
            "gender": "male",
            "country": "NL"
        });
        if let (Some(target), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
            target.extend(extra.clone());
        }
        serde_json::from_value(value).unwrap()
    }

    fn build(intake: &Intake, seed: u64, site_filters: bool) -> BTreeMap<Category, String> {
        let styles = normalize_styles(&intake.styles);
        let palette = resolve_palette(&styles, intake.favorite_colors.as_deref());
        let mut rng = StdRng::seed_from_u64(seed);
        QueryBuilder::new(intake, &styles, &palette)
            .with_site_filters(site_filters)
            .build(&mut rng)
    }

    #[test]
    fn test_one_query_per_category() {
        let queries = build(&intake(json!({})), 42, false);
        assert_eq!(queries.len(), Category::ALL.len());
        for query in queries.values() {
            assert!(query.starts_with("men "), "unexpected query: {}", query);
        }
    }

    #[test]
    fn test_same_seed_same_queries() {
        let intake = intake(json!({ "fit": "Relaxed" }));
        assert_eq!(build(&intake, 42, true), build(&intake, 42, true));
    }

    #[test]
    fn test_color_comes_from_leading_palette() {
        let intake = intake(json!({}));
        let queries = build(&intake, 7, false);
        // casual palette starts navy, olive, white
        for query in queries.values() {
            assert!(
                ["navy", "olive", "white"].iter().any(|c| query.ends_with(c)),
                "unexpected query: {}",
                query
            );
        }
    }

    #[test]
    fn test_site_filters_use_country_shops() {
        let queries = build(&intake(json!({ "country": "de" })), 42, true);
        let outer = &queries[&Category::Outer];
        assert!(outer.contains("(site:zalando.de OR site:aboutyou.de OR site:hm.com"));
    }

    #[test]
    fn test_unlisted_country_uses_baseline_shops() {
        let queries = build(&intake(json!({ "country": "PL" })), 42, true);
        assert!(queries[&Category::Shoes].contains("site:wehkamp.nl"));
    }

    #[test]
    fn test_demo_queries_have_no_site_filters() {
        let queries = build(&intake(json!({})), 42, false);
        assert!(queries.values().all(|q| !q.contains("site:")));
    }

    #[test]
    fn test_fit_and_accessibility_words() {
        let intake = intake(json!({
            "fit": "Relaxed",
            "accessibility": { "easy_closures": true, "soft_fabrics": "yes" },
            "sustainability_preference": true
        }));
        let queries = build(&intake, 42, false);
        for query in queries.values() {
            assert!(query.contains(
                " relaxed magnetic snap easy closure soft brushed stretch sustainable"
            ));
        }
    }

    #[test]
    fn test_gender_terms() {
        let female = build(&intake(json!({ "gender": "female" })), 1, false);
        assert!(female[&Category::Top1].starts_with("women "));

        let non_binary = build(&intake(json!({ "gender": "non-binary" })), 1, false);
        assert!(non_binary[&Category::Top1].starts_with("unisex "));
    }
}
