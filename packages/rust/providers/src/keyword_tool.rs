//! Search-ad keyword tool adapter: search volume, related keywords, and CPC.
//!
//! The keyword tool reports monthly PC and mobile query counts per keyword,
//! using a `"< 10"` placeholder for small counts. Request signing is handled
//! outside this crate; only the static credential headers are sent.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

use goldkey_shared::{AppConfig, GoldkeyError, KeywordToolConfig, Result, read_credential};

use crate::http::{self, Count};
use crate::{CpcProvider, RelatedKeywordProvider, SearchVolumeProvider};

const KEYWORDS_PATH: &str = "keywordstool";
const ESTIMATE_PATH: &str = "estimate/average-position-bid/keyword";

/// API key and customer id for the keyword tool.
#[derive(Clone)]
pub struct KeywordToolCredentials {
    api_key: String,
    customer_id: String,
}

impl KeywordToolCredentials {
    pub fn new(api_key: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            customer_id: customer_id.into(),
        }
    }

    pub fn from_env(config: &KeywordToolConfig) -> Option<Self> {
        let key = read_credential(&config.api_key_env)?;
        let customer = read_credential(&config.customer_id_env)?;
        Some(Self::new(key, customer))
    }
}

impl std::fmt::Debug for KeywordToolCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordToolCredentials")
            .field("api_key", &"<redacted>")
            .field("customer_id", &self.customer_id)
            .finish()
    }
}

/// One row of the keyword tool response.
#[derive(Debug, Clone, PartialEq)]
struct KeywordStat {
    keyword: String,
    pc: Option<Count>,
    mobile: Option<Count>,
}

/// Blocking client for the keyword tool endpoints.
#[derive(Debug, Clone)]
pub struct KeywordToolClient {
    client: Client,
    base_url: Url,
    credentials: Option<KeywordToolCredentials>,
}

impl KeywordToolClient {
    pub fn new(
        base_url: &str,
        credentials: Option<KeywordToolCredentials>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url: http::parse_base_url(base_url)?,
            credentials,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.keyword_tool.base_url,
            KeywordToolCredentials::from_env(&config.keyword_tool),
            Duration::from_secs(config.defaults.timeout_secs),
        )
    }

    fn credentials(&self) -> Result<&KeywordToolCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            GoldkeyError::unavailable("keyword-tool", "API key/customer id not configured")
        })
    }

    /// Fetch keyword stats for a hint keyword (sent without whitespace).
    fn keyword_stats(&self, keyword: &str) -> Result<Vec<KeywordStat>> {
        let credentials = self.credentials()?;
        let hint = hint_keyword(keyword);
        if hint.is_empty() {
            return Err(GoldkeyError::validation("empty hint keyword"));
        }

        let url = http::endpoint(&self.base_url, KEYWORDS_PATH)?;
        let request = self
            .client
            .get(url)
            .header("X-API-KEY", &credentials.api_key)
            .header("X-Customer", &credentials.customer_id)
            .query(&[("hintKeywords", hint.as_str()), ("showDetail", "1")]);

        let body = http::send_json(KEYWORDS_PATH, request)?;
        parse_keyword_list(&body)
    }

    /// Monthly PC + mobile query count for `keyword`.
    #[instrument(skip(self))]
    pub fn monthly_volume(&self, keyword: &str) -> Result<u64> {
        let hint = hint_keyword(keyword).to_uppercase();
        let stats = self.keyword_stats(keyword)?;

        let stat = stats
            .iter()
            .find(|s| hint_keyword(&s.keyword).to_uppercase() == hint)
            .ok_or_else(|| {
                GoldkeyError::malformed(format!("{KEYWORDS_PATH}: no entry for '{keyword}'"))
            })?;

        let (Some(pc), Some(mobile)) = (stat.pc, stat.mobile) else {
            return Err(GoldkeyError::malformed(format!(
                "{KEYWORDS_PATH}: non-numeric query counts for '{keyword}'"
            )));
        };

        if pc == Count::Suppressed || mobile == Count::Suppressed {
            debug!(keyword, ?pc, ?mobile, "suppressed query count read as zero");
        }
        Ok(total_queries(pc, mobile))
    }

    /// Related keywords in response order, excluding the hint itself.
    #[instrument(skip(self))]
    pub fn related_keywords(&self, keyword: &str) -> Result<Vec<String>> {
        let hint = hint_keyword(keyword).to_uppercase();
        let stats = self.keyword_stats(keyword)?;

        Ok(stats
            .into_iter()
            .map(|s| s.keyword)
            .filter(|k| hint_keyword(k).to_uppercase() != hint)
            .collect())
    }

    /// Estimated first-position bid, used as the cost per click.
    #[instrument(skip(self))]
    pub fn first_position_bid(&self, keyword: &str) -> Result<u64> {
        let credentials = self.credentials()?;
        let url = http::endpoint(&self.base_url, ESTIMATE_PATH)?;
        let body = json!({
            "device": "PC",
            "items": [{ "key": keyword, "position": 1 }],
        });

        let request = self
            .client
            .post(url)
            .header("X-API-KEY", &credentials.api_key)
            .header("X-Customer", &credentials.customer_id)
            .json(&body);

        let response = http::send_json(ESTIMATE_PATH, request)?;
        let bid = response
            .get("estimate")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(|item| item.get("bid"))
            .and_then(http::parse_count);

        match bid {
            Some(Count::Exact(n)) => Ok(n),
            _ => Err(GoldkeyError::malformed(format!(
                "{ESTIMATE_PATH}: missing numeric bid for '{keyword}'"
            ))),
        }
    }
}

impl SearchVolumeProvider for KeywordToolClient {
    fn name(&self) -> &str {
        "keyword-tool"
    }

    fn search_volume(&self, keyword: &str) -> Result<u64> {
        self.monthly_volume(keyword)
    }
}

impl RelatedKeywordProvider for KeywordToolClient {
    fn name(&self) -> &str {
        "keyword-tool"
    }

    fn lookup(&self, keyword: &str) -> Result<Vec<String>> {
        self.related_keywords(keyword)
    }
}

impl CpcProvider for KeywordToolClient {
    fn name(&self) -> &str {
        "keyword-tool-cpc"
    }

    fn backend(&self) -> &str {
        "keyword-tool"
    }

    fn cost_per_click(&self, keyword: &str) -> Result<u64> {
        self.first_position_bid(keyword)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// PC plus mobile queries. Saturates on absurd payload values.
fn total_queries(pc: Count, mobile: Count) -> u64 {
    pc.or_zero().saturating_add(mobile.or_zero())
}

/// The keyword tool rejects whitespace in hint keywords.
fn hint_keyword(keyword: &str) -> String {
    keyword.split_whitespace().collect()
}

fn parse_keyword_list(body: &Value) -> Result<Vec<KeywordStat>> {
    let list = body
        .get("keywordList")
        .and_then(Value::as_array)
        .ok_or_else(|| GoldkeyError::malformed(format!("{KEYWORDS_PATH}: missing 'keywordList'")))?;

    Ok(list
        .iter()
        .filter_map(|entry| {
            let keyword = entry.get("relKeyword")?.as_str()?.trim();
            if keyword.is_empty() {
                return None;
            }
            Some(KeywordStat {
                keyword: keyword.to_string(),
                pc: entry.get("monthlyPcQcCnt").and_then(http::parse_count),
                mobile: entry.get("monthlyMobileQcCnt").and_then(http::parse_count),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixture(name: &str) -> String {
        let path = format!("../../../fixtures/json/{name}");
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }

    fn client(base: &str) -> KeywordToolClient {
        let creds = Some(KeywordToolCredentials::new("key", "1234"));
        KeywordToolClient::new(base, creds, Duration::from_secs(2)).unwrap()
    }

    async fn mount_keywords(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/keywordstool"))
            .and(query_param("hintKeywords", "캠핑의자"))
            .and(query_param("showDetail", "1"))
            .and(header("X-API-KEY", "key"))
            .and(header("X-Customer", "1234"))
            .respond_with(ResponseTemplate::new(200).set_body_string(fixture("keywordstool.json")))
            .mount(server)
            .await;
    }

    #[test]
    fn hint_keyword_strips_whitespace() {
        assert_eq!(hint_keyword(" 캠핑 의자 "), "캠핑의자");
    }

    #[test]
    fn total_queries_saturates() {
        assert_eq!(total_queries(Count::Exact(12_300), Count::Suppressed), 12_300);
        let huge = http::parse_count(&json!(1e30)).unwrap();
        assert_eq!(huge, Count::Exact(u64::MAX));
        assert_eq!(total_queries(huge, Count::Exact(5)), u64::MAX);
    }

    #[test]
    fn all_ports_share_one_backend() {
        let client = client("https://api.example.com");
        assert_eq!(SearchVolumeProvider::backend(&client), "keyword-tool");
        assert_eq!(RelatedKeywordProvider::backend(&client), "keyword-tool");
        assert_eq!(CpcProvider::backend(&client), "keyword-tool");
        assert_eq!(CpcProvider::name(&client), "keyword-tool-cpc");
    }

    #[test]
    fn parse_keyword_list_skips_blank_rows() {
        let body = json!({"keywordList": [
            {"relKeyword": "텐트", "monthlyPcQcCnt": 10, "monthlyMobileQcCnt": "< 10"},
            {"relKeyword": "  ", "monthlyPcQcCnt": 1, "monthlyMobileQcCnt": 1},
            {"monthlyPcQcCnt": 1}
        ]});
        let stats = parse_keyword_list(&body).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].mobile, Some(Count::Suppressed));
    }

    #[test]
    fn missing_keyword_list_is_malformed() {
        let err = parse_keyword_list(&json!({"data": []})).unwrap_err();
        assert!(matches!(err, GoldkeyError::MalformedResponse { .. }));
    }

    #[test]
    fn missing_credentials_is_unavailable() {
        let client = KeywordToolClient::new("https://api.example.com", None, Duration::from_secs(1)).unwrap();
        let err = client.search_volume("텐트").unwrap_err();
        assert!(matches!(err, GoldkeyError::ProviderUnavailable { .. }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn volume_sums_pc_and_mobile() {
        let server = MockServer::start().await;
        mount_keywords(&server).await;

        let uri = server.uri();
        let volume = tokio::task::spawn_blocking(move || client(&uri).search_volume("캠핑 의자"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(volume, 12_300 + 88_100);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn related_excludes_hint_and_keeps_order() {
        let server = MockServer::start().await;
        mount_keywords(&server).await;

        let uri = server.uri();
        let related = tokio::task::spawn_blocking(move || client(&uri).lookup("캠핑의자"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            related,
            vec!["경량캠핑의자", "릴렉스체어", "캠핑테이블", "헬리녹스체어원"]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn volume_without_matching_row_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/keywordstool"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"keywordList":[{"relKeyword":"다른키워드","monthlyPcQcCnt":5,"monthlyMobileQcCnt":5}]}"#,
            ))
            .mount(&server)
            .await;

        let uri = server.uri();
        let err = tokio::task::spawn_blocking(move || client(&uri).search_volume("텐트"))
            .await
            .unwrap()
            .unwrap_err();

        assert!(matches!(err, GoldkeyError::MalformedResponse { .. }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn suppressed_counts_read_as_zero() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/keywordstool"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"keywordList":[{"relKeyword":"희귀키워드","monthlyPcQcCnt":"< 10","monthlyMobileQcCnt":"< 10"}]}"#,
            ))
            .mount(&server)
            .await;

        let uri = server.uri();
        let volume = tokio::task::spawn_blocking(move || client(&uri).search_volume("희귀키워드"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(volume, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cpc_reads_first_estimate() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/estimate/average-position-bid/keyword"))
            .and(body_json(json!({
                "device": "PC",
                "items": [{ "key": "텐트", "position": 1 }],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"device":"PC","estimate":[{"keyword":"텐트","position":1,"bid":1250}]}"#,
            ))
            .mount(&server)
            .await;

        let uri = server.uri();
        let cpc = tokio::task::spawn_blocking(move || client(&uri).cost_per_click("텐트"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(cpc, 1250);
    }
}
