//! API Handlers
//!
//! HTTP request handlers for each counter server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::badge::{self, Theme, MAX_PLACES};
use crate::config::Config;
use crate::counter::{HitCounter, DEMO_DISPLAY, DEMO_NAME};
use crate::error::{CounterError, Result};
use crate::models::{BadgeQuery, CounterName, RecordResponse, StatsResponse, Tally};
use crate::store::CounterStore;

const NO_CACHE: &str = "max-age=0, no-cache, no-store, must-revalidate";
const DEMO_CACHE: &str = "max-age=31536000";
const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Write-behind hit counter
    pub counter: Arc<HitCounter>,
    /// Badge defaults and site settings
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState around an existing counter.
    pub fn new(counter: Arc<HitCounter>, config: Config) -> Self {
        Self {
            counter,
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState with a fresh counter over `store`.
    pub fn from_store(store: Arc<dyn CounterStore>, config: Config) -> Self {
        Self::new(Arc::new(HitCounter::new(store)), config)
    }

    // == Tally ==
    /// Records a hit for `name`. The demo name is answered here and never
    /// reaches the counter.
    pub async fn tally(&self, name: &CounterName) -> Tally {
        if name.as_str() == DEMO_NAME {
            return Tally::Demo;
        }
        Tally::Count(self.counter.record_hit(name.as_str()).await.count)
    }
}

fn parse_name(segment: &str) -> Result<CounterName> {
    CounterName::from_segment(segment).map_err(CounterError::InvalidRequest)
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Handler for GET /get/@:name
///
/// Records a hit and returns the count as an SVG badge.
pub async fn badge_handler(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(query): Query<BadgeQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let name = parse_name(&segment)?;
    let tally = state.tally(&name).await;

    let theme_name = query
        .theme
        .as_deref()
        .unwrap_or(state.config.default_theme.as_str());
    let (length, cache_control) = match tally {
        Tally::Demo => (DEMO_DISPLAY.len(), DEMO_CACHE),
        Tally::Count(_) => (
            query
                .length
                .unwrap_or(state.config.digit_places)
                .min(MAX_PLACES),
            NO_CACHE,
        ),
    };

    let svg = badge::render(&tally.display(), Theme::by_name(theme_name), length);

    info!(
        counter = name.as_str(),
        count = %tally.display(),
        theme = theme_name,
        referrer = header_str(&headers, header::REFERER),
        user_agent = header_str(&headers, header::USER_AGENT),
        "badge served"
    );

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(SVG_CONTENT_TYPE)),
            (header::CACHE_CONTROL, HeaderValue::from_static(cache_control)),
        ],
        svg,
    )
        .into_response())
}

/// Handler for GET /record/@:name
///
/// Records a hit and returns the count as JSON.
pub async fn record_handler(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<RecordResponse>> {
    let name = parse_name(&segment)?;
    let tally = state.tally(&name).await;

    Ok(Json(RecordResponse::new(name.as_str(), tally)))
}

/// Handler for GET /heart-beat
pub async fn heart_beat_handler() -> impl IntoResponse {
    info!("heart-beat");
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE))],
        "alive",
    )
}

/// Handler for GET /stats
///
/// Returns current counter cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.counter.stats().await.into())
}

/// Handler for GET /
///
/// Plain-text usage page.
pub async fn index_handler(State(state): State<AppState>, headers: HeaderMap) -> String {
    let site = match &state.config.site {
        Some(site) => site.trim_end_matches('/').to_string(),
        None => format!(
            "http://{}",
            header_str(&headers, header::HOST).unwrap_or("localhost")
        ),
    };
    let themes: Vec<&str> = Theme::names().collect();

    format!(
        "Moe Counter\n\n\
         Badge:  {site}/get/@your-name\n\
         JSON:   {site}/record/@your-name\n\
         Themes: {themes} (?theme=name)\n\
         Demo:   {site}/get/@{demo}\n",
        site = site,
        themes = themes.join(", "),
        demo = DEMO_NAME,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_state() -> AppState {
        AppState::from_store(Arc::new(MemoryStore::new()), Config::default())
    }

    #[tokio::test]
    async fn test_record_handler_counts() {
        let state = test_state();

        let first = record_handler(State(state.clone()), Path("@home".to_string()))
            .await
            .unwrap();
        let second = record_handler(State(state.clone()), Path("@home".to_string()))
            .await
            .unwrap();

        assert_eq!(first.num, Tally::Count(1));
        assert_eq!(second.num, Tally::Count(2));
    }

    #[tokio::test]
    async fn test_record_handler_rejects_missing_at() {
        let state = test_state();

        let result = record_handler(State(state), Path("home".to_string())).await;
        assert!(matches!(result, Err(CounterError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_demo_never_reaches_counter() {
        let state = test_state();

        for _ in 0..3 {
            let response = record_handler(State(state.clone()), Path("@demo".to_string()))
                .await
                .unwrap();
            assert_eq!(response.num, Tally::Demo);
        }

        assert_eq!(state.counter.pending_len().await, 0);
        let stats = state.counter.stats().await;
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[tokio::test]
    async fn test_badge_handler_headers() {
        let state = test_state();

        let response = badge_handler(
            State(state),
            Path("@home".to_string()),
            Query(BadgeQuery::default()),
            HeaderMap::new(),
        )
        .await
        .unwrap();

        assert_eq!(response.headers()[header::CONTENT_TYPE], SVG_CONTENT_TYPE);
        assert_eq!(response.headers()[header::CACHE_CONTROL], NO_CACHE);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        state.counter.increment("a").await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.stats.misses, 1);
        assert_eq!(response.stats.pending_keys, 1);
    }

    #[tokio::test]
    async fn test_index_uses_configured_site() {
        let config = Config {
            site: Some("https://count.example/".to_string()),
            ..Config::default()
        };
        let state = AppState::from_store(Arc::new(MemoryStore::new()), config);

        let page = index_handler(State(state), HeaderMap::new()).await;
        assert!(page.contains("https://count.example/get/@your-name"));
    }
}
