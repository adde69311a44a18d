use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::DawaError;
use crate::sources::openfda::{LabelRecord, LabelSearchResponse, OpenFdaClient};
use crate::transform;

pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const ERROR_MESSAGE: &str = "An error occurred";
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a drug name.";

/// A trimmed, non-empty drug name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// # Errors
    ///
    /// Returns [`DawaError::InvalidArgument`] when the name is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self, DawaError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DawaError::InvalidArgument(EMPTY_QUERY_MESSAGE.into()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display texts for one drug label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugInfo {
    pub name: String,
    pub benefits: String,
    pub side_effects: String,
    pub dosage: String,
    pub when_to_take: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(DrugInfo),
    NoResults,
    Failed { message: String },
}

impl SearchOutcome {
    pub(crate) fn failed(err: &DawaError) -> Self {
        let message = match err.transport_detail() {
            Some(detail) => format!("{ERROR_MESSAGE}: {detail}"),
            None => ERROR_MESSAGE.to_string(),
        };
        Self::Failed { message }
    }

    /// One-line status for outcomes that carry no label.
    pub fn status_message(&self) -> Option<&str> {
        match self {
            Self::Found(_) => None,
            Self::NoResults => Some(NO_RESULTS_MESSAGE),
            Self::Failed { message } => Some(message.as_str()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Collapses a search response into an outcome.
///
/// `render` is only called when the response holds at least one record, and only
/// for the first one.
pub(crate) fn resolve_outcome<F>(
    result: Result<LabelSearchResponse, DawaError>,
    render: F,
) -> SearchOutcome
where
    F: FnOnce(&LabelRecord) -> DrugInfo,
{
    match result {
        Ok(resp) => match resp.first() {
            Some(record) => SearchOutcome::Found(render(record)),
            None => SearchOutcome::NoResults,
        },
        Err(err) => {
            debug!(error = ?err, "label search failed");
            SearchOutcome::failed(&err)
        }
    }
}

/// Runs one lookup and maps the first matching label for display.
pub async fn lookup(client: &OpenFdaClient, query: &SearchQuery) -> SearchOutcome {
    info!(drug = query.as_str(), "searching drug labels");
    let result = client.label_search(query).await;
    resolve_outcome(result, transform::label::render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::openfda::OpenFdaConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn search_query_trims_input() {
        let q = SearchQuery::parse("  Advil \n").unwrap();
        assert_eq!(q.as_str(), "Advil");
        assert_eq!(q.to_string(), "Advil");
    }

    #[test]
    fn search_query_rejects_blank_input() {
        let err = SearchQuery::parse("   ").unwrap_err();
        assert!(matches!(err, DawaError::InvalidArgument(_)));
        assert!(err.to_string().contains(EMPTY_QUERY_MESSAGE));
    }

    #[test]
    fn empty_results_skip_render() {
        let outcome = resolve_outcome(Ok(LabelSearchResponse::default()), |_| {
            panic!("render must not run for an empty result")
        });
        assert_eq!(outcome, SearchOutcome::NoResults);
        assert_eq!(outcome.status_message(), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn only_first_record_is_rendered() {
        let resp: LabelSearchResponse = serde_json::from_value(serde_json::json!({
            "results": [
                {"openfda": {"brand_name": ["First"]}},
                {"openfda": {"brand_name": ["Second"]}}
            ]
        }))
        .unwrap();

        let mut calls = 0;
        let outcome = resolve_outcome(Ok(resp), |record| {
            calls += 1;
            transform::label::render(record)
        });
        assert_eq!(calls, 1);
        match outcome {
            SearchOutcome::Found(info) => assert_eq!(info.name, "First"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn http_status_failure_has_no_suffix() {
        let err = DawaError::Api {
            api: "openfda".into(),
            message: "HTTP 500".into(),
        };
        let outcome = resolve_outcome(Err(err), |_| panic!("not called"));
        assert_eq!(
            outcome,
            SearchOutcome::Failed {
                message: ERROR_MESSAGE.to_string()
            }
        );
        assert!(outcome.is_failure());
    }

    #[test]
    fn decode_failure_carries_detail() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = DawaError::ApiJson {
            api: "openfda".into(),
            source,
        };
        let outcome = resolve_outcome(Err(err), |_| panic!("not called"));
        let message = outcome.status_message().unwrap();
        assert!(message.starts_with("An error occurred: "));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(SearchOutcome::NoResults).unwrap();
        assert_eq!(json, serde_json::json!({"status": "no_results"}));

        let json = serde_json::to_value(SearchOutcome::Failed {
            message: "An error occurred".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["message"], "An error occurred");
    }

    #[tokio::test]
    async fn lookup_maps_first_label() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "indications_and_usage": ["Relieves headache"],
                    "warnings": ["Stomach bleeding"],
                    "dosage_and_administration": ["Take every 4 hours"],
                    "openfda": {"brand_name": ["Advil"], "generic_name": ["ibuprofen"]}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = OpenFdaConfig::default().with_base(server.uri());
        let client = OpenFdaClient::new(&config).unwrap();
        let outcome = lookup(&client, &SearchQuery::parse("advil").unwrap()).await;

        let SearchOutcome::Found(info) = outcome else {
            panic!("expected a label");
        };
        assert_eq!(info.name, "Advil");
        assert_eq!(info.benefits, "Relieves headache");
        assert_eq!(info.side_effects, "Stomach bleeding");
        assert_eq!(info.dosage, "Take every 4 hours");
        assert_eq!(info.when_to_take, "Take every 4 hours");
    }

    #[tokio::test]
    async fn lookup_reports_failure_for_not_found_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"code": "NOT_FOUND", "message": "No matches found!"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = OpenFdaConfig::default().with_base(server.uri());
        let client = OpenFdaClient::new(&config).unwrap();
        let outcome = lookup(&client, &SearchQuery::parse("zzz").unwrap()).await;
        assert_eq!(
            outcome,
            SearchOutcome::Failed {
                message: ERROR_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn lookup_reports_html_body_with_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("<html>down for maintenance</html>"),
            )
            .mount(&server)
            .await;

        let config = OpenFdaConfig::default().with_base(server.uri());
        let client = OpenFdaClient::new(&config).unwrap();
        let outcome = lookup(&client, &SearchQuery::parse("aspirin").unwrap()).await;

        assert!(outcome.is_failure());
        let message = outcome.status_message().expect("status");
        assert!(message.starts_with("An error occurred: "));
    }

    #[tokio::test]
    async fn lookup_reports_failure_for_unreachable_host() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = OpenFdaConfig::default().with_base(format!("http://127.0.0.1:{port}"));
        let client = OpenFdaClient::new(&config).unwrap();
        let outcome = lookup(&client, &SearchQuery::parse("aspirin").unwrap()).await;

        let message = outcome.status_message().expect("status");
        assert!(outcome.is_failure());
        assert!(message.starts_with("An error occurred: "));
    }
}
