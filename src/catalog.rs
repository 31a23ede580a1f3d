//! Session catalog: record types, payload normalization and retrieval.
//!
//! The data-store adapter serves a JSON array of session objects. Two key
//! schemas have been seen in the wild:
//!
//! - normalized: `id`, `title`, `level`, `duration`, `youtubeId`, `startTime`
//! - store-native: `Name`/`Title`, `Level`, `Duration`, `YouTubeID`/`YoutubeId`,
//!   `Start Time`, optionally nested under `fields` and wrapped in `records`
//!
//! Both are mapped onto [`SessionRecord`] with defaults filled in. A record
//! with missing data is kept, never dropped.

use crate::config::{DEFAULT_DURATION_SECS, DEFAULT_LEVEL};
use crate::utils::{normalize_video_ref, value_to_secs, value_to_string};
use futures::future::LocalBoxFuture;
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

const ID_KEYS: &[&str] = &["ID", "Id"];
const TITLE_KEYS: &[&str] = &["title", "Title", "Name", "name"];
const LEVEL_KEYS: &[&str] = &["level", "Level"];
const DURATION_KEYS: &[&str] = &["duration", "Duration", "durationSeconds"];
const VIDEO_KEYS: &[&str] = &["youtubeId", "YouTubeID", "YoutubeId", "videoRef"];
const START_KEYS: &[&str] = &["startTime", "Start Time", "start_time", "videoStartOffsetSeconds"];

/// One selectable workout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: String,
    pub title: String,
    pub level: String,
    pub duration_secs: u32,
    pub video_ref: String,
    pub video_start_secs: u32,
}

/// Ordered list of sessions, loaded once and never mutated afterwards.
pub type SessionCatalog = Vec<SessionRecord>;

/// A session object as served, before normalization.
///
/// Store-native records keep their id at the top level and the columns under
/// `fields`; the normalized schema puts everything at the top level, which
/// lands in `columns`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    fields: Option<Value>,
    #[serde(flatten)]
    columns: Map<String, Value>,
}

/// Response body shapes the adapter produces.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogBody {
    Sessions(Vec<RawRecord>),
    Failure { error: Value },
    Wrapped { records: Vec<RawRecord> },
}

/// Failures while retrieving or decoding the catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// The request never produced a response.
    Network(String),
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// The body was not JSON or not a list of sessions.
    Payload(String),
    /// The adapter reported its own failure in the body.
    Upstream(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Network(msg) => write!(f, "Catalog request failed: {}", msg),
            CatalogError::Status(code) => write!(f, "Catalog endpoint returned HTTP {}", code),
            CatalogError::Payload(msg) => write!(f, "Malformed catalog payload: {}", msg),
            CatalogError::Upstream(msg) => write!(f, "Data store reported an error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Payload(e.to_string())
    }
}

fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

/// Map one raw session onto a [`SessionRecord`], filling defaults.
///
/// Columns under `fields` win over top-level ones.
pub fn normalize_record(raw: &RawRecord) -> SessionRecord {
    let nested = raw.fields.as_ref().and_then(Value::as_object);
    let columns = &raw.columns;
    let field = |keys: &[&str]| nested.and_then(|n| lookup(n, keys)).or_else(|| lookup(columns, keys));

    let id = raw
        .id
        .as_ref()
        .filter(|value| !value.is_null())
        .or_else(|| lookup(columns, ID_KEYS))
        .and_then(value_to_string)
        .unwrap_or_default();
    let title = field(TITLE_KEYS)
        .and_then(value_to_string)
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    let level = field(LEVEL_KEYS)
        .and_then(value_to_string)
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let duration_secs = field(DURATION_KEYS)
        .and_then(value_to_secs)
        .filter(|secs| *secs > 0)
        .map(|secs| secs.min(u32::MAX as i64) as u32)
        .unwrap_or(DEFAULT_DURATION_SECS);
    let video_ref = field(VIDEO_KEYS)
        .and_then(value_to_string)
        .map(|v| normalize_video_ref(&v))
        .unwrap_or_default();
    let video_start_secs = field(START_KEYS)
        .and_then(value_to_secs)
        .map(|secs| secs.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0);

    SessionRecord {
        id,
        title,
        level,
        duration_secs,
        video_ref,
        video_start_secs,
    }
}

/// Decode a catalog response body.
///
/// Accepts a bare array or a `{ "records": [...] }` wrapper. An object
/// carrying an `error` key is the adapter's failure body and is rejected, as
/// is any non-object element: the catalog loads whole or not at all.
pub fn parse_catalog(body: &str) -> Result<SessionCatalog, CatalogError> {
    let raw = match serde_json::from_str::<CatalogBody>(body)? {
        CatalogBody::Sessions(raw) | CatalogBody::Wrapped { records: raw } => raw,
        CatalogBody::Failure { error } => {
            let msg = value_to_string(&error).unwrap_or_else(|| error.to_string());
            return Err(CatalogError::Upstream(msg));
        }
    };

    Ok(raw
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let record = normalize_record(item);
            debug!(
                "Session {}: '{}' level={} duration={}s video='{}'",
                i, record.title, record.level, record.duration_secs, record.video_ref
            );
            record
        })
        .collect())
}

/// Something that can produce the session catalog.
///
/// The browser build uses [`HttpCatalogSource`]; tests substitute fixtures.
pub trait CatalogSource {
    fn fetch(&self) -> LocalBoxFuture<'_, Result<SessionCatalog, CatalogError>>;
}

/// Fetches the catalog with a single GET against the adapter endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpCatalogSource {
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch(&self) -> LocalBoxFuture<'_, Result<SessionCatalog, CatalogError>> {
        Box::pin(async move {
            let response = gloo_net::http::Request::get(&self.url)
                .send()
                .await
                .map_err(|e| CatalogError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(CatalogError::Status(response.status()));
            }

            let body = response
                .text()
                .await
                .map_err(|e| CatalogError::Network(e.to_string()))?;
            parse_catalog(&body)
        })
    }
}

/// Load the catalog once, degrading every failure to an empty catalog.
///
/// Failures are logged and not retried.
pub async fn load_catalog(source: &dyn CatalogSource) -> SessionCatalog {
    match source.fetch().await {
        Ok(catalog) if catalog.is_empty() => {
            warn!("Catalog loaded but contains no sessions");
            catalog
        }
        Ok(catalog) => {
            info!("Loaded {} sessions", catalog.len());
            catalog
        }
        Err(e) => {
            error!("Failed to load sessions: {}", e);
            SessionCatalog::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    struct FixedSource(fn() -> Result<SessionCatalog, CatalogError>);

    impl CatalogSource for FixedSource {
        fn fetch(&self) -> LocalBoxFuture<'_, Result<SessionCatalog, CatalogError>> {
            let result = (self.0)();
            Box::pin(async move { result })
        }
    }

    fn raw(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalized_schema() {
        let record = normalize_record(&raw(json!({
            "id": "rec1",
            "title": "Eye of the Tiger",
            "level": "Hard",
            "duration": 45,
            "youtubeId": " btPJPFnesV4 ",
            "startTime": 12
        })));
        assert_eq!(
            record,
            SessionRecord {
                id: "rec1".into(),
                title: "Eye of the Tiger".into(),
                level: "Hard".into(),
                duration_secs: 45,
                video_ref: "btPJPFnesV4".into(),
                video_start_secs: 12,
            }
        );
    }

    #[test]
    fn store_native_schema() {
        let record = normalize_record(&raw(json!({
            "id": "recX",
            "fields": {
                "Name": "Warmup",
                "Level": "Easy",
                "Duration": "20",
                "YouTubeID": "https://www.youtube.com/watch?v=abcdef123",
                "Start Time": 7
            }
        })));
        assert_eq!(record.id, "recX");
        assert_eq!(record.title, "Warmup");
        assert_eq!(record.level, "Easy");
        assert_eq!(record.duration_secs, 20);
        assert_eq!(record.video_ref, "abcdef123");
        assert_eq!(record.video_start_secs, 7);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let record = normalize_record(&raw(json!({ "id": "rec2" })));
        assert_eq!(record.title, "");
        assert_eq!(record.level, DEFAULT_LEVEL);
        assert_eq!(record.duration_secs, DEFAULT_DURATION_SECS);
        assert_eq!(record.video_ref, "");
        assert_eq!(record.video_start_secs, 0);
    }

    #[test]
    fn bad_numbers_get_defaults() {
        for duration in [json!("long"), json!(0), json!(-10), json!(null)] {
            let record = normalize_record(&raw(json!({ "duration": duration, "startTime": -4 })));
            assert_eq!(record.duration_secs, DEFAULT_DURATION_SECS);
            assert_eq!(record.video_start_secs, 0);
        }
    }

    #[test]
    fn parse_array_and_wrapper() {
        let catalog = parse_catalog(r#"[{"level":"Easy"},{"level":"Hard","duration":60}]"#).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].duration_secs, 60);

        let wrapped = parse_catalog(r#"{"records":[{"id":"a","fields":{"Level":"Medium"}}]}"#).unwrap();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].id, "a");

        assert!(parse_catalog("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_bad_payloads() {
        assert!(matches!(parse_catalog("not json"), Err(CatalogError::Payload(_))));
        assert!(matches!(parse_catalog("42"), Err(CatalogError::Payload(_))));
        assert!(matches!(parse_catalog(r#"[{"id":"a"}, 3]"#), Err(CatalogError::Payload(_))));
        assert!(matches!(
            parse_catalog(r#"{"error":"Veri çekilemedi"}"#),
            Err(CatalogError::Upstream(msg)) if msg == "Veri çekilemedi"
        ));
    }

    #[test]
    fn envelope_shapes() {
        // An error body wins even when records ride along
        assert!(matches!(
            parse_catalog(r#"{"error":"quota","records":[]}"#),
            Err(CatalogError::Upstream(msg)) if msg == "quota"
        ));
        assert!(matches!(parse_catalog("{}"), Err(CatalogError::Payload(_))));
        assert!(matches!(
            parse_catalog(r#"{"records":"none"}"#),
            Err(CatalogError::Payload(_))
        ));
    }

    #[test]
    fn raw_record_keeps_unknown_columns() {
        let record = raw(json!({ "ID": 7, "Level": "Hard", "Notes": "grip" }));
        assert_eq!(record.columns.get("Notes"), Some(&json!("grip")));
        let normalized = normalize_record(&record);
        assert_eq!(normalized.id, "7");
        assert_eq!(normalized.level, "Hard");
    }

    #[test]
    fn load_degrades_to_empty() {
        let failing = FixedSource(|| Err(CatalogError::Status(500)));
        assert!(block_on(load_catalog(&failing)).is_empty());

        let ok = FixedSource(|| parse_catalog(r#"[{"level":"Medium"}]"#));
        assert_eq!(block_on(load_catalog(&ok)).len(), 1);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CatalogError::Status(503).to_string(),
            "Catalog endpoint returned HTTP 503"
        );
    }
}
