//! Document store access
//!
//! The document store is an external collaborator: all courtboard needs is
//! "give me every record of collection X". Backends return plain JSON values;
//! typed decoding and validation happen here.

pub mod dir;
pub mod http;

pub use dir::JsonDirSource;
pub use http::HttpSource;

use crate::error::{CoreError, LoadReport};
use crate::models::{compare_names, Match, Player, Record, Team};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Read-only access to document-store collections
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// All records of `collection`, in storage order
    async fn list(&self, collection: &str) -> Result<Vec<Value>, CoreError>;

    /// Human-readable location, for logs and CLI output
    fn describe(&self) -> String;
}

/// Flatten a collection payload into records.
///
/// Accepts an array of records, or an object keyed by document id (an export
/// of the store). In the keyed form, the key is copied into `id` when the
/// record has none.
pub fn records_from_value(origin: &str, value: Value) -> Result<Vec<Value>, CoreError> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(doc_id, mut record)| {
                if let Value::Object(fields) = &mut record {
                    fields.entry("id").or_insert(Value::String(doc_id));
                }
                record
            })
            .collect()),
        _ => Err(CoreError::UnexpectedShape {
            origin: origin.to_string(),
        }),
    }
}

/// Decode records into `T`, skipping (and reporting) the ones that do not fit
pub fn decode_records<T>(records: Vec<Value>, report: &mut LoadReport) -> Vec<T>
where
    T: Record + DeserializeOwned,
{
    let mut decoded = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let source = format!("{}[{}]", T::COLLECTION, index);
        match serde_json::from_value::<T>(record) {
            Ok(item) => match item.validate() {
                Ok(()) => decoded.push(item),
                Err(reason) => report.skip(source, reason),
            },
            Err(e) => report.skip(source, e.to_string()),
        }
    }
    report.records_loaded += decoded.len();
    decoded
}

/// Fetch and decode one collection
pub async fn load_collection<T>(
    source: &dyn DocumentSource,
    report: &mut LoadReport,
) -> Result<Vec<T>, CoreError>
where
    T: Record + DeserializeOwned,
{
    let records = source.list(T::COLLECTION).await?;
    let total = records.len();
    let skipped_before = report.records_skipped;

    let decoded = decode_records::<T>(records, report);

    let skipped = report.records_skipped - skipped_before;
    if skipped > 0 {
        warn!(
            collection = T::COLLECTION,
            skipped, total, "Skipped malformed records"
        );
    }
    debug!(
        collection = T::COLLECTION,
        loaded = decoded.len(),
        source = %source.describe(),
        "Collection loaded"
    );
    Ok(decoded)
}

/// Upstream team list, sorted by name (case-insensitive)
pub async fn list_teams(source: &dyn DocumentSource) -> Result<Vec<Team>, CoreError> {
    let mut report = LoadReport::new();
    let mut teams: Vec<Team> = load_collection(source, &mut report).await?;
    teams.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(teams)
}

/// Roster and match history, with a report of skipped records
pub async fn load_roster(
    source: &dyn DocumentSource,
) -> Result<(Vec<Player>, Vec<Match>, LoadReport), CoreError> {
    let mut report = LoadReport::new();
    let players: Vec<Player> = load_collection(source, &mut report).await?;

    let mut match_report = LoadReport::new();
    let matches: Vec<Match> = load_collection(source, &mut match_report).await?;
    if match_report.has_errors() {
        debug!(
            skipped = match_report.records_skipped,
            "Match history loaded with skipped records"
        );
    }
    report.merge(match_report);

    Ok((players, matches, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_from_array() {
        let records = records_from_value("teams", json!([{"name": "a"}, {"name": "b"}])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_records_from_keyed_object_injects_id() {
        let records = records_from_value(
            "players",
            json!({
                "p1": {"name": "Ana Ruiz"},
                "p2": {"id": "explicit", "name": "Bo Chen"}
            }),
        )
        .unwrap();

        let ids: Vec<_> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert!(ids.contains(&"p1"));
        assert!(ids.contains(&"explicit"));
    }

    #[test]
    fn test_records_from_scalar_is_error() {
        let err = records_from_value("teams", json!("nope")).unwrap_err();
        assert!(matches!(err, CoreError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_decode_records_skips_malformed_teams() {
        let mut report = LoadReport::new();
        let records = vec![
            json!({"name": "UCLA (M)", "logoUrl": "https://x/ucla.png"}),
            json!({"name": "No Logo (M)"}),
            json!({"logoUrl": "https://x/anon.png"}),
            json!({"name": "", "logoUrl": "https://x/blank.png"}),
        ];

        let teams: Vec<Team> = decode_records(records, &mut report);

        assert_eq!(teams.len(), 1);
        assert_eq!(report.records_loaded, 1);
        assert_eq!(report.records_skipped, 3);
        assert!(report.errors.iter().any(|e| e.source == "teams[1]"));
    }

    struct FixedSource;

    #[async_trait]
    impl DocumentSource for FixedSource {
        async fn list(&self, collection: &str) -> Result<Vec<Value>, CoreError> {
            let payload = match collection {
                "players" => json!({
                    "p1": {"name": "Ana Ruiz"},
                    "p2": {"name": ""}
                }),
                "matches" => json!([
                    {"id": "m1", "date": "2025-02-08", "kind": "singles",
                     "clientTeam": "UCLA (W)", "opponentTeam": "USC (W)",
                     "clientPlayers": ["p1"]},
                    {"id": "m2", "kind": "doubles"}
                ]),
                _ => json!([]),
            };
            records_from_value(collection, payload)
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    #[tokio::test]
    async fn test_load_roster_merges_collection_reports() {
        let (players, matches, report) = load_roster(&FixedSource).await.unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(matches.len(), 1);
        assert_eq!(report.records_loaded, 2);
        assert_eq!(report.records_skipped, 2);
        let sources: Vec<_> = report.errors.iter().map(|e| e.source.as_str()).collect();
        assert!(sources.iter().any(|s| s.starts_with("players[")));
        assert!(sources.contains(&"matches[1]"));
    }
}
