//! Link resolution for live search results.
//!
//! Shopping results often point at the aggregator's product page instead of the
//! merchant. Resolution prefers, in order:
//!
//! 1. a non-aggregator link already on the result
//! 2. a seller link found through a product lookup, matching the merchant when possible
//! 3. a web search for the item title and merchant
//!
//! Every path ends in an absolute `https://` or `http://` URL.

use reqwest::Url;

use crate::{
    error::AppResult,
    models::{CandidateItem, Locale, SellerResult},
};

const SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Looks up the sellers offering a product
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SellerLookup: Send + Sync {
    async fn sellers(&self, product_id: &str, locale: Locale) -> AppResult<Vec<SellerResult>>;
}

/// Whether a URL points at the shopping aggregator rather than a merchant
pub fn is_aggregator(url: &str) -> bool {
    url.contains("google.com") || url.contains("shopping.google")
}

/// Web search URL for free text
pub fn search_url(text: &str) -> String {
    match Url::parse_with_params(SEARCH_ENDPOINT, &[("q", text.trim())]) {
        Ok(url) => url.to_string(),
        Err(_) => SEARCH_ENDPOINT.to_string(),
    }
}

/// Makes a raw link clickable, falling back to a search for title and merchant
pub fn normalize_link(raw: Option<&str>, title: &str, merchant: &str) -> String {
    let url = raw.map(str::trim).unwrap_or_default();

    if let Some(rest) = url.strip_prefix("//") {
        if !rest.is_empty() {
            return format!("https://{}", rest);
        }
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    if looks_like_host(url) {
        return format!("https://{}", url);
    }

    search_url(&format!("{} {}", title.trim(), merchant.trim()))
}

fn looks_like_host(url: &str) -> bool {
    !url.is_empty()
        && url.contains('.')
        && !url.starts_with(['#', '/', '.'])
        && !url.chars().any(char::is_whitespace)
}

/// First non-empty link, preferring merchant links over aggregator ones
pub fn first_url<'a, I>(links: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let candidates: Vec<&str> = links
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    candidates
        .iter()
        .find(|l| !is_aggregator(l))
        .or_else(|| candidates.first())
        .map(|l| l.to_string())
}

/// Product id embedded in an aggregator URL like `.../shopping/product/1234?...`
pub fn product_id_from_url(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("/product/")?;
    let id: String = rest.chars().take_while(char::is_ascii_digit).collect();
    (!id.is_empty()).then_some(id)
}

/// Seller link matching the merchant's first name word, else the first merchant link
pub fn pick_seller_link(sellers: &[SellerResult], merchant: &str) -> Option<(String, String)> {
    let usable = || {
        sellers.iter().filter_map(|s| {
            let link = s.link.as_deref().map(str::trim).filter(|l| !l.is_empty())?;
            (!is_aggregator(link)).then_some((s, link))
        })
    };

    let merchant_word = merchant
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !merchant_word.is_empty() {
        let matched = usable().find(|(seller, link)| {
            let store = seller.store_name().unwrap_or_default().to_lowercase();
            store.contains(&merchant_word) || link.to_lowercase().contains(&merchant_word)
        });
        if let Some((seller, link)) = matched {
            let store = seller.store_name().unwrap_or(merchant).to_string();
            return Some((link.to_string(), store));
        }
    }

    usable().next().map(|(seller, link)| {
        let store = seller.store_name().unwrap_or(merchant).to_string();
        (link.to_string(), store)
    })
}

/// Resolves a clickable merchant link for a live search result; never fails
pub async fn resolve_direct_link<L>(lookup: &L, item: &CandidateItem, locale: Locale) -> String
where
    L: SellerLookup + ?Sized,
{
    let merchant = item.source.as_deref().unwrap_or_default();
    let link = item.link.as_deref().map(str::trim).filter(|l| !l.is_empty());

    if let Some(url) = link.filter(|url| !is_aggregator(url)) {
        return normalize_link(Some(url), &item.title, merchant);
    }

    let product_id = item
        .product_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .or_else(|| link.and_then(product_id_from_url));

    if let Some(product_id) = product_id {
        match lookup.sellers(&product_id, locale).await {
            Ok(sellers) => {
                if let Some((url, store)) = pick_seller_link(&sellers, merchant) {
                    tracing::debug!(
                        product_id = %product_id,
                        store = %store,
                        "Resolved direct seller link"
                    );
                    return normalize_link(Some(&url), &item.title, &store);
                }
                tracing::debug!(
                    product_id = %product_id,
                    sellers = sellers.len(),
                    "No direct seller link found"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    product_id = %product_id,
                    "Seller lookup failed, using search link"
                );
            }
        }
    }

    normalize_link(None, &item.title, merchant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Category, RawPrice};

    const LOCALE: Locale = Locale { gl: "nl", hl: "nl" };

    fn item(link: Option<&str>, product_id: Option<&str>) -> CandidateItem {
        CandidateItem {
            title: "Navy overshirt".to_string(),
            price: Some(RawPrice::Number(55.0)),
            currency: Some("EUR".to_string()),
            link: link.map(str::to_string),
            source: Some("Zalando.nl".to_string()),
            thumbnail: None,
            category: Category::Outer,
            product_id: product_id.map(str::to_string),
        }
    }

    fn seller(link: &str, source: &str) -> SellerResult {
        SellerResult {
            link: Some(link.to_string()),
            source: Some(source.to_string()),
            ..SellerResult::default()
        }
    }

    #[test]
    fn test_normalize_link_variants() {
        assert_eq!(
            normalize_link(Some("//shop.example/p/1"), "t", "m"),
            "https://shop.example/p/1"
        );
        assert_eq!(
            normalize_link(Some("http://shop.example"), "t", "m"),
            "http://shop.example"
        );
        assert_eq!(
            normalize_link(Some("shop.example/p/1"), "t", "m"),
            "https://shop.example/p/1"
        );
    }

    #[test]
    fn test_normalize_link_falls_back_to_search() {
        assert_eq!(
            normalize_link(Some("#"), "Wool scarf", "demo"),
            "https://www.google.com/search?q=Wool+scarf+demo"
        );
        assert_eq!(
            normalize_link(None, "Beanie", ""),
            "https://www.google.com/search?q=Beanie"
        );
    }

    #[test]
    fn test_first_url_prefers_merchant() {
        let links = [
            Some("https://www.google.com/shopping/product/1"),
            None,
            Some("  "),
            Some("https://www.zalando.nl/item"),
        ];
        assert_eq!(first_url(links), Some("https://www.zalando.nl/item".to_string()));
        assert_eq!(
            first_url([Some("https://www.google.com/shopping/product/1")]),
            Some("https://www.google.com/shopping/product/1".to_string())
        );
        assert_eq!(first_url([None, Some("")]), None);
    }

    #[test]
    fn test_product_id_from_url() {
        assert_eq!(
            product_id_from_url("https://www.google.com/shopping/product/98765?gl=nl"),
            Some("98765".to_string())
        );
        assert_eq!(product_id_from_url("https://www.google.com/search?q=x"), None);
    }

    #[test]
    fn test_pick_seller_prefers_merchant_match() {
        let sellers = vec![
            seller("https://www.google.com/aclk?x", "Google"),
            seller("https://www.bol.com/p/1", "bol.com"),
            seller("https://www.zalando.nl/p/1", "Zalando"),
        ];
        let (link, store) = pick_seller_link(&sellers, "Zalando.nl").unwrap();
        assert_eq!(link, "https://www.zalando.nl/p/1");
        assert_eq!(store, "Zalando");

        let (link, _) = pick_seller_link(&sellers, "Wehkamp").unwrap();
        assert_eq!(link, "https://www.bol.com/p/1");
    }

    #[test]
    fn test_pick_seller_none_when_only_aggregator() {
        let sellers = vec![seller("https://www.google.com/aclk?x", "Google")];
        assert_eq!(pick_seller_link(&sellers, "Zalando"), None);
    }

    #[tokio::test]
    async fn test_resolve_keeps_direct_merchant_link() {
        let mut lookup = MockSellerLookup::new();
        lookup.expect_sellers().never();

        let link = resolve_direct_link(
            &lookup,
            &item(Some("https://www.zalando.nl/overshirt"), Some("1")),
            LOCALE,
        )
        .await;
        assert_eq!(link, "https://www.zalando.nl/overshirt");
    }

    #[tokio::test]
    async fn test_resolve_uses_product_lookup() {
        let mut lookup = MockSellerLookup::new();
        lookup
            .expect_sellers()
            .withf(|id, locale| id == "555" && locale.gl == "nl")
            .times(1)
            .returning(|_, _| Ok(vec![seller("https://www.zalando.nl/p/555", "Zalando")]));

        let link = resolve_direct_link(
            &lookup,
            &item(Some("https://www.google.com/shopping/product/555"), None),
            LOCALE,
        )
        .await;
        assert_eq!(link, "https://www.zalando.nl/p/555");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_search_on_lookup_error() {
        let mut lookup = MockSellerLookup::new();
        lookup
            .expect_sellers()
            .returning(|_, _| Err(AppError::Upstream("timeout".to_string())));

        let link = resolve_direct_link(&lookup, &item(None, Some("42")), LOCALE).await;
        assert_eq!(
            link,
            "https://www.google.com/search?q=Navy+overshirt+Zalando.nl"
        );
    }

    #[tokio::test]
    async fn test_resolve_without_any_link_or_id() {
        let mut lookup = MockSellerLookup::new();
        lookup.expect_sellers().never();

        let link = resolve_direct_link(&lookup, &item(None, None), LOCALE).await;
        assert!(link.starts_with("https://www.google.com/search?q="));
    }
}
