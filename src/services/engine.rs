use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use crate::{
    models::{
        Allocation, CandidateItem, Category, EngineResult, Intake, Locale, Mode, Palette,
        SelectedItem, Style,
    },
    services::{
        budget, composer,
        palette::{normalize_styles, resolve_palette},
        presets,
        providers::{CatalogSource, SearchRequest},
        query::QueryBuilder,
        selector,
    },
};

const INDEPENDENT_NOTE: &str =
    "This service is independent: no affiliate income. Links are provided purely for convenience.";

/// Per-call knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub outfits_count: usize,
    /// Seed for the per-call query generator
    pub seed: u64,
}

/// Result of a generation call plus how the source behaved
#[derive(Debug, Clone)]
pub struct Generation {
    pub result: EngineResult,
    /// Searches actually sent to the source (cache hits excluded)
    pub searches: usize,
    pub failed_searches: usize,
}

impl Generation {
    /// True when searches were made and every one of them failed
    pub fn all_searches_failed(&self) -> bool {
        self.searches > 0 && self.failed_searches == self.searches
    }
}

/// Query results memoized for the duration of one call
type QueryCache = HashMap<String, Vec<CandidateItem>>;

/// Assembles outfits for an intake from one catalog source
///
/// A call never fails: upstream errors and empty categories degrade to
/// placeholder items.
pub struct Engine<'a> {
    source: &'a dyn CatalogSource,
    options: EngineOptions,
}

impl<'a> Engine<'a> {
    pub fn new(source: &'a dyn CatalogSource, options: EngineOptions) -> Self {
        Self { source, options }
    }

    pub async fn generate(&self, intake: &Intake) -> Generation {
        let start = Instant::now();
        let mode = self.source.mode();

        let country = intake.country_code();
        let currency = resolve_currency(&country, intake.currency.as_deref());
        let locale = presets::locale_for(&country);
        let styles = normalize_styles(&intake.styles);
        let palette = resolve_palette(&styles, intake.favorite_colors.as_deref());
        let allocation = budget::allocate(budget::resolve_total(intake));
        let avoided = intake.avoided_materials();

        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let queries = QueryBuilder::new(intake, &styles, &palette)
            .with_site_filters(mode == Mode::Serpapi)
            .build(&mut rng);

        tracing::info!(
            provider = self.source.name(),
            country = %country,
            styles = ?styles,
            budget = allocation.total(),
            "Starting outfit generation"
        );

        let mut fetcher = CandidateFetcher::new(self.source);
        let mut selected: BTreeMap<Category, SelectedItem> = BTreeMap::new();

        for (category, query) in queries {
            let request = SearchRequest {
                category,
                query,
                locale,
                gender: intake.gender,
                styles: styles.clone(),
                palette: palette.clone(),
            };

            let candidates = fetcher.fetch(&request).await;
            let candidates = selector::exclude_materials(candidates, &avoided);
            let item = self
                .select_item(&request, &candidates, &allocation, &currency, locale)
                .await;
            selected.insert(category, item);
        }

        let outfits = composer::compose(&selected, self.options.outfits_count, &currency);
        let (searches, failed_searches) = (fetcher.searches, fetcher.failed_searches);

        tracing::info!(
            provider = self.source.name(),
            outfits = outfits.len(),
            searches,
            failed_searches,
            processing_time_ms = start.elapsed().as_millis(),
            "Outfit generation completed"
        );

        let result = EngineResult {
            explanation: explain(intake, &styles, &palette, &allocation, &currency, mode),
            independent_note: INDEPENDENT_NOTE.to_string(),
            palette,
            allocation,
            outfits,
            country,
            currency,
            mode,
        };

        Generation {
            result,
            searches,
            failed_searches,
        }
    }

    async fn select_item(
        &self,
        request: &SearchRequest,
        candidates: &[CandidateItem],
        allocation: &Allocation,
        currency: &str,
        locale: Locale,
    ) -> SelectedItem {
        let cap = allocation.get(request.category);

        match selector::select(candidates, cap) {
            Some(selection) => {
                let link = self.source.resolve_link(selection.chosen, locale).await;
                selector::to_selected(selection.chosen, link, currency, selection.cheaper)
            }
            None => {
                tracing::debug!(
                    category = %request.category,
                    candidates = candidates.len(),
                    "No priced candidates, using placeholder"
                );
                selector::placeholder(request.category, cap, currency, &request.query)
            }
        }
    }
}

/// Fetches candidates per request, memoizing by query text when the source allows it
///
/// A failed search is cached as an empty list, so each distinct query reaches
/// a caching source at most once per call.
pub struct CandidateFetcher<'s> {
    source: &'s dyn CatalogSource,
    cache: QueryCache,
    /// Searches actually sent to the source
    pub searches: usize,
    pub failed_searches: usize,
}

impl<'s> CandidateFetcher<'s> {
    pub fn new(source: &'s dyn CatalogSource) -> Self {
        Self {
            source,
            cache: QueryCache::new(),
            searches: 0,
            failed_searches: 0,
        }
    }

    pub async fn fetch(&mut self, request: &SearchRequest) -> Vec<CandidateItem> {
        let caching = self.source.caches_queries();

        if caching {
            if let Some(hit) = self.cache.get(&request.query) {
                tracing::debug!(query = %request.query, "Query cache hit");
                return hit
                    .iter()
                    .map(|c| CandidateItem {
                        category: request.category,
                        ..c.clone()
                    })
                    .collect();
            }
        }

        self.searches += 1;
        let found = match self.source.search(request).await {
            Ok(found) => found,
            Err(e) => {
                self.failed_searches += 1;
                tracing::warn!(
                    error = %e,
                    category = %request.category,
                    provider = self.source.name(),
                    "Catalog search failed, continuing without candidates"
                );
                Vec::new()
            }
        };

        if caching {
            self.cache.insert(request.query.clone(), found.clone());
        }
        found
    }
}

/// Currency override if given, else the country's currency
pub fn resolve_currency(country: &str, currency_override: Option<&str>) -> String {
    currency_override
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| presets::currency_for(country).to_string())
}

fn explain(
    intake: &Intake,
    styles: &[Style],
    palette: &Palette,
    allocation: &Allocation,
    currency: &str,
    mode: Mode,
) -> String {
    let colors: Vec<&str> = palette.colors.iter().take(4).map(String::as_str).collect();
    let styles: Vec<&str> = styles.iter().map(Style::as_str).collect();

    let mut explanation = format!(
        "Outfits for {}. We built a palette around {}. \
         The selection follows the styles {} (≈70%) with a playful accent (≈30%). \
         Budget guard: total ≈ {} {:.0} with a ±10% margin per item. \
         Where possible, each item comes with one cheaper alternative.",
        intake.purpose.trim(),
        colors.join(", "),
        styles.join(", "),
        currency,
        allocation.total(),
    );

    if mode == Mode::Serpapi {
        explanation.push_str(
            " Products were searched via Google Shopping for your style, country and budget; \
             direct store links were looked up where needed.",
        );
    }

    explanation
}
