/// SerpAPI Google Shopping provider
///
/// Live candidate search plus direct-link resolution.
///
/// API Flow:
/// 1. Search: `engine=google_shopping` → `shopping_results`
/// 2. Seller lookup (only for aggregator links): `engine=google_shopping_product` → `sellers_results`
use crate::{
    error::{AppError, AppResult},
    models::{
        CandidateItem, Category, Locale, Mode, ProductResponse, RawPrice, SellerResult,
        ShoppingResponse, ShoppingResult,
    },
    services::links::{self, SellerLookup},
    services::providers::{CatalogSource, SearchRequest},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const SEARCH_ENGINE: &str = "google_shopping";
const PRODUCT_ENGINE: &str = "google_shopping_product";
const RESULTS_PER_QUERY: &str = "12";

#[derive(Clone)]
pub struct SerpApiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl SerpApiProvider {
    /// Creates a provider; a blank key is a configuration error
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> AppResult<Self> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(AppError::Configuration(
                "SerpAPI mode selected but no API key provided".to_string(),
            ));
        }

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    /// Sends one GET to the SerpAPI endpoint and decodes the body
    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> AppResult<T> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(redact)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "SerpAPI returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await.map_err(redact)?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize SerpAPI response");
            AppError::Upstream(format!("Failed to parse SerpAPI response: {}", e))
        })
    }
}

/// Drops the request URL from transport errors; it carries the API key
fn redact(error: reqwest::Error) -> AppError {
    AppError::HttpClient(error.without_url())
}

/// Converts raw shopping results into candidates for a category
pub fn normalize_results(category: Category, response: ShoppingResponse) -> Vec<CandidateItem> {
    response
        .shopping_results
        .unwrap_or_default()
        .into_iter()
        .map(|result| candidate_from_result(category, result))
        .collect()
}

fn candidate_from_result(category: Category, result: ShoppingResult) -> CandidateItem {
    let link = links::first_url(result.link_fields());
    let price = match (result.extracted_price, result.price) {
        (Some(extracted), _) if extracted.is_finite() && extracted > 0.0 => {
            Some(RawPrice::Number(extracted))
        }
        (_, price) => price,
    };

    CandidateItem {
        title: result.title.unwrap_or_default(),
        price,
        currency: result.currency,
        link,
        source: result.source.or(result.seller),
        thumbnail: result.thumbnail,
        category,
        product_id: result.product_id,
    }
}

#[async_trait::async_trait]
impl CatalogSource for SerpApiProvider {
    async fn search(&self, request: &SearchRequest) -> AppResult<Vec<CandidateItem>> {
        let response: ShoppingResponse = self
            .get_json(&[
                ("engine", SEARCH_ENGINE),
                ("q", request.query.as_str()),
                ("gl", request.locale.gl),
                ("hl", request.locale.hl),
                ("num", RESULTS_PER_QUERY),
            ])
            .await?;

        let items = normalize_results(request.category, response);

        tracing::info!(
            query = %request.query,
            category = %request.category,
            results = items.len(),
            provider = "serpapi",
            "Shopping search completed"
        );

        Ok(items)
    }

    async fn resolve_link(&self, item: &CandidateItem, locale: Locale) -> String {
        links::resolve_direct_link(self, item, locale).await
    }

    fn caches_queries(&self) -> bool {
        true
    }

    fn mode(&self) -> Mode {
        Mode::Serpapi
    }

    fn name(&self) -> &'static str {
        "serpapi"
    }
}

#[async_trait::async_trait]
impl SellerLookup for SerpApiProvider {
    async fn sellers(&self, product_id: &str, locale: Locale) -> AppResult<Vec<SellerResult>> {
        let response: ProductResponse = self
            .get_json(&[
                ("engine", PRODUCT_ENGINE),
                ("product_id", product_id),
                ("gl", locale.gl),
                ("hl", locale.hl),
            ])
            .await?;

        Ok(response.sellers_results.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_key() {
        let result = SerpApiProvider::new(
            HttpClient::new(),
            "  ".to_string(),
            "http://test.local".to_string(),
        );
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_provider_reports_live_mode_and_caches() {
        let provider = SerpApiProvider::new(
            HttpClient::new(),
            "test_key".to_string(),
            "http://test.local".to_string(),
        )
        .unwrap();
        assert_eq!(provider.mode(), Mode::Serpapi);
        assert!(provider.caches_queries());
    }

    #[tokio::test]
    async fn test_transport_errors_do_not_expose_api_key() {
        let provider = SerpApiProvider::new(
            HttpClient::new(),
            "SUPERSECRETKEY".to_string(),
            "http://127.0.0.1:9/search.json".to_string(),
        )
        .unwrap();
        let request = SearchRequest {
            category: Category::Outer,
            query: "men overshirt navy".to_string(),
            locale: Locale { gl: "nl", hl: "nl" },
            gender: crate::models::Gender::Male,
            styles: vec![crate::models::Style::Casual],
            palette: crate::models::Palette {
                colors: vec!["navy".to_string()],
            },
        };

        let search_err = provider.search(&request).await.unwrap_err();
        assert!(matches!(search_err, AppError::HttpClient(_)));
        assert!(!search_err.to_string().contains("SUPERSECRETKEY"));

        let lookup_err = provider
            .sellers("111", Locale { gl: "nl", hl: "nl" })
            .await
            .unwrap_err();
        assert!(!lookup_err.to_string().contains("SUPERSECRETKEY"));
    }

    #[test]
    fn test_normalize_results() {
        let json = r#"{
            "search_metadata": { "status": "Success" },
            "shopping_results": [
                {
                    "title": "Overshirt navy | Selected Homme",
                    "price": "€59,95",
                    "extracted_price": 59.95,
                    "product_link": "https://www.google.com/shopping/product/111",
                    "link": "https://www.zalando.nl/overshirt.html",
                    "source": "Zalando.nl",
                    "thumbnail": "https://img.example/1.jpg",
                    "product_id": "111"
                },
                {
                    "title": "Shacket olive",
                    "price": "€ 44,99",
                    "product_link": "https://www.google.com/shopping/product/222",
                    "seller": "Wehkamp"
                }
            ]
        }"#;

        let response: ShoppingResponse = serde_json::from_str(json).unwrap();
        let items = normalize_results(Category::Outer, response);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price_value(), 59.95);
        assert_eq!(
            items[0].link.as_deref(),
            Some("https://www.zalando.nl/overshirt.html")
        );
        assert_eq!(items[0].source.as_deref(), Some("Zalando.nl"));
        assert_eq!(items[0].category, Category::Outer);

        assert_eq!(items[1].price_value(), 44.99);
        assert_eq!(
            items[1].link.as_deref(),
            Some("https://www.google.com/shopping/product/222")
        );
        assert_eq!(items[1].source.as_deref(), Some("Wehkamp"));
    }

    #[test]
    fn test_normalize_results_without_results() {
        let response: ShoppingResponse =
            serde_json::from_str(r#"{ "error": "Google hasn't returned any results" }"#).unwrap();
        assert!(normalize_results(Category::Tee, response).is_empty());
    }

    #[test]
    fn test_product_response_deserialization() {
        let json = r#"{
            "sellers_results": [
                { "name": "Zalando", "source": "Zalando", "link": "https://www.zalando.nl/p" }
            ]
        }"#;
        let response: ProductResponse = serde_json::from_str(json).unwrap();
        let sellers = response.sellers_results.unwrap();
        assert_eq!(sellers[0].link.as_deref(), Some("https://www.zalando.nl/p"));
    }
}
