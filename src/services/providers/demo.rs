/// Offline demo catalog
///
/// Filters the static catalog by category, gender, style and palette color.
/// The query text is ignored. Never fails.
use crate::{
    error::AppResult,
    models::{CandidateItem, Gender, Mode, RawPrice},
    services::presets::{DemoItem, DEFAULT_CURRENCY, DEMO_CATALOG, DEMO_MERCHANT},
    services::providers::{CatalogSource, SearchRequest},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCatalog;

impl DemoCatalog {
    pub fn new() -> Self {
        Self
    }

    fn matches(item: &DemoItem, request: &SearchRequest) -> bool {
        item.category == request.category
            && (item.gender == Gender::Unisex || item.gender == request.gender)
            && item.styles.iter().any(|s| request.styles.contains(s))
            && request.palette.contains(item.color)
    }
}

impl From<&DemoItem> for CandidateItem {
    fn from(item: &DemoItem) -> Self {
        CandidateItem {
            title: item.title.to_string(),
            price: Some(RawPrice::Number(item.price)),
            currency: Some(DEFAULT_CURRENCY.to_string()),
            link: None,
            source: Some(DEMO_MERCHANT.to_string()),
            thumbnail: None,
            category: item.category,
            product_id: None,
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for DemoCatalog {
    async fn search(&self, request: &SearchRequest) -> AppResult<Vec<CandidateItem>> {
        let items: Vec<CandidateItem> = DEMO_CATALOG
            .iter()
            .filter(|item| Self::matches(item, request))
            .map(CandidateItem::from)
            .collect();

        tracing::debug!(
            category = %request.category,
            results = items.len(),
            provider = "demo",
            "Demo catalog search completed"
        );

        Ok(items)
    }

    fn mode(&self) -> Mode {
        Mode::Demo
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Locale, Palette, Style};

    fn request(category: Category, gender: Gender, styles: &[Style], colors: &[&str]) -> SearchRequest {
        SearchRequest {
            category,
            query: "ignored".to_string(),
            locale: Locale { gl: "nl", hl: "nl" },
            gender,
            styles: styles.to_vec(),
            palette: Palette {
                colors: colors.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    fn titles(request: &SearchRequest) -> Vec<String> {
        tokio_test::block_on(DemoCatalog::new().search(request))
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect()
    }

    #[test]
    fn test_filters_by_category_gender_style_and_color() {
        let request = request(
            Category::Outer,
            Gender::Male,
            &[Style::Casual],
            &["navy", "olive", "white", "grey"],
        );
        assert_eq!(titles(&request), vec!["Navy overshirt (demo)"]);
    }

    #[test]
    fn test_unisex_items_match_every_gender() {
        let request = request(
            Category::Bottom,
            Gender::Female,
            &[Style::Sportief],
            &["black", "charcoal", "white", "cobalt"],
        );
        assert_eq!(titles(&request), vec!["Black joggers (demo)"]);
    }

    #[test]
    fn test_non_binary_only_matches_unisex_items() {
        let request = request(
            Category::Top2,
            Gender::NonBinary,
            &[Style::Casual],
            &["navy", "white"],
        );
        assert_eq!(titles(&request), vec!["Crewneck navy (demo)"]);
    }

    #[test]
    fn test_color_must_be_in_palette() {
        let request = request(
            Category::Shoes,
            Gender::Male,
            &[Style::Klassiek],
            &["navy", "camel", "white", "light blue"],
        );
        // cognac loafers are klassiek but cognac is not in the palette
        assert!(titles(&request).is_empty());
    }

    #[test]
    fn test_candidates_carry_demo_merchant() {
        let request = request(Category::Tee, Gender::Unisex, &[Style::Minimalistisch], &["white", "black"]);
        let items = tokio_test::block_on(DemoCatalog::new().search(&request)).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items
            .iter()
            .all(|i| i.source.as_deref() == Some(DEMO_MERCHANT) && i.link.is_none()));
    }
}
