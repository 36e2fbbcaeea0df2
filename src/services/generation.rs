use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{EngineResult, GenerateRequest, Intake, Mode},
    services::{
        engine::{Engine, EngineOptions},
        providers::{CatalogSource, DemoCatalog, SerpApiProvider},
    },
};
use reqwest::Client as HttpClient;

/// Picks the effective mode from the requested one and the available key
///
/// Without an explicit mode a key means live search. Asking for live search
/// without a key is a configuration error.
pub fn resolve_mode(requested: Option<Mode>, api_key: Option<&str>) -> AppResult<Mode> {
    match (requested, api_key) {
        (Some(Mode::Serpapi), None) => Err(AppError::Configuration(
            "SerpAPI mode requested but no API key is configured".to_string(),
        )),
        (Some(mode), _) => Ok(mode),
        (None, Some(_)) => Ok(Mode::Serpapi),
        (None, None) => Ok(Mode::Demo),
    }
}

/// Request key if given, else the server's key; blanks count as absent
fn resolve_api_key<'a>(request_key: Option<&'a str>, config: &'a Config) -> Option<&'a str> {
    request_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or_else(|| config.serpapi_key())
}

/// Runs the engine on `source`, redoing the call on the demo catalog when
/// every live search failed
pub async fn run_with_fallback(
    source: &dyn CatalogSource,
    intake: &Intake,
    options: EngineOptions,
) -> EngineResult {
    let generation = Engine::new(source, options).generate(intake).await;

    if source.mode() == Mode::Serpapi && generation.all_searches_failed() {
        tracing::warn!(
            provider = source.name(),
            failed_searches = generation.failed_searches,
            "All live searches failed, falling back to demo catalog"
        );
        let demo = DemoCatalog::new();
        return Engine::new(&demo, options).generate(intake).await.result;
    }

    generation.result
}

/// Handles one generate request end to end
pub async fn generate(
    request: GenerateRequest,
    config: &Config,
    http_client: &HttpClient,
) -> AppResult<EngineResult> {
    request.intake.validate()?;

    let api_key = resolve_api_key(request.serpapi_api_key.as_deref(), config);
    let mode = resolve_mode(request.mode, api_key)?;
    let options = EngineOptions {
        outfits_count: request.outfits_count,
        seed: config.random_seed,
    };

    tracing::info!(
        requested_mode = ?request.mode,
        mode = ?mode,
        outfits_count = options.outfits_count,
        "Resolved generation mode"
    );

    let result = match (mode, api_key) {
        (Mode::Serpapi, Some(key)) => {
            let provider = SerpApiProvider::new(
                http_client.clone(),
                key.to_string(),
                config.serpapi_url.clone(),
            )?;
            run_with_fallback(&provider, &request.intake, options).await
        }
        _ => run_with_fallback(&DemoCatalog::new(), &request.intake, options).await,
    };

    Ok(result)
}
