use std::borrow::Cow;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::entities::drug::SearchQuery;
use crate::error::DawaError;
use crate::sources::HttpConfig;

const OPENFDA_BASE: &str = "https://api.fda.gov";
const OPENFDA_API: &str = "openfda";
const OPENFDA_BASE_ENV: &str = "DAWA_OPENFDA_BASE";
const OPENFDA_API_KEY_ENV: &str = "OPENFDA_API_KEY";
const LABEL_PATH: &str = "drug/label.json";

/// Connection settings for [`OpenFdaClient`].
#[derive(Debug, Clone)]
pub struct OpenFdaConfig {
    pub base: Cow<'static, str>,
    pub api_key: Option<String>,
    pub http: HttpConfig,
}

impl Default for OpenFdaConfig {
    fn default() -> Self {
        Self {
            base: Cow::Borrowed(OPENFDA_BASE),
            api_key: None,
            http: HttpConfig::default(),
        }
    }
}

impl OpenFdaConfig {
    /// Reads `DAWA_OPENFDA_BASE` and `OPENFDA_API_KEY`, falling back to the public endpoint.
    pub fn from_env(http: HttpConfig) -> Self {
        Self {
            base: crate::sources::env_base(OPENFDA_BASE, OPENFDA_BASE_ENV),
            api_key: crate::sources::env_value(OPENFDA_API_KEY_ENV),
            http,
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Cow::Owned(base.into());
        self
    }
}

pub struct OpenFdaClient {
    client: reqwest_middleware::ClientWithMiddleware,
    base: Cow<'static, str>,
    api_key: Option<String>,
}

impl OpenFdaClient {
    pub fn new(config: &OpenFdaConfig) -> Result<Self, DawaError> {
        Ok(Self {
            client: crate::sources::build_client(&config.http)?,
            base: config.base.clone(),
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Search expression matching the name against brand or generic name.
    pub(crate) fn label_query(drug_name: &str) -> String {
        format!(
            "{} OR {}",
            crate::utils::query::phrase_clause("openfda.brand_name", drug_name),
            crate::utils::query::phrase_clause("openfda.generic_name", drug_name),
        )
    }

    /// Issues one label search.
    ///
    /// An empty `results` list is a successful response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, any non-success status (including
    /// openFDA's 404 `NOT_FOUND`), or an undecodable body.
    pub async fn label_search(
        &self,
        query: &SearchQuery,
    ) -> Result<LabelSearchResponse, DawaError> {
        let q = Self::label_query(query.as_str());
        let url = self.endpoint(LABEL_PATH);

        let mut req = self.client.get(&url).query(&[("search", q.as_str())]);
        if let Some(key) = self.api_key.as_deref() {
            req = req.query(&[("api_key", key)]);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let content_type = resp.headers().get(CONTENT_TYPE).cloned();
        let bytes = crate::sources::read_limited_body(resp, OPENFDA_API).await?;

        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            return Err(DawaError::Api {
                api: OPENFDA_API.to_string(),
                message: format!("HTTP {status}: {excerpt}"),
            });
        }

        crate::sources::ensure_json_content_type(OPENFDA_API, content_type.as_ref(), &bytes)?;

        serde_json::from_slice(&bytes).map_err(|source| DawaError::ApiJson {
            api: OPENFDA_API.to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelSearchResponse {
    #[serde(default)]
    pub results: Vec<LabelRecord>,
}

impl LabelSearchResponse {
    pub fn first(&self) -> Option<&LabelRecord> {
        self.results.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelRecord {
    #[serde(default)]
    #[allow(dead_code)]
    pub id: Option<String>,
    #[serde(default)]
    pub indications_and_usage: Option<Vec<String>>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
    #[serde(default)]
    pub adverse_reactions: Option<Vec<String>>,
    #[serde(default)]
    pub dosage_and_administration: Option<Vec<String>>,
    #[serde(default)]
    pub openfda: Option<LabelOpenFda>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelOpenFda {
    #[serde(default)]
    pub brand_name: Option<Vec<String>>,
    #[serde(default)]
    pub generic_name: Option<Vec<String>>,
    #[serde(default)]
    #[allow(dead_code)]
    pub manufacturer_name: Option<Vec<String>>,
}
