use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::retry::retry_on_timeout;
use crate::config::CollectorConfig;
use crate::core::{Error, Indicator, IndicatorRecord, Result};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Client for the World Bank indicators API.
#[derive(Clone)]
pub struct WorldBankClient {
    config: CollectorConfig,
    client: Client,
}

impl WorldBankClient {
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn page_url(&self, indicator_code: &str, page: u32) -> String {
        format!(
            "{}/country/all/indicator/{}?format=json&per_page={}&page={}",
            self.config.base_url.trim_end_matches('/'),
            indicator_code,
            self.config.per_page,
            page
        )
    }

    /// Fetch every page of one indicator, retrying the whole download on timeouts.
    pub async fn fetch_indicator(&self, indicator: Indicator) -> Result<Vec<IndicatorRecord>> {
        let label = format!("World Bank {}", indicator.code());
        let raw = retry_on_timeout(&self.config.retry, &label, || {
            self.fetch_all_pages(indicator.code())
        })
        .await?;

        let records = to_indicator_records(raw, self.config.countries.as_deref());
        log::info!(
            "Fetched {} usable records for indicator {}",
            records.len(),
            indicator.code()
        );
        Ok(records)
    }

    async fn fetch_all_pages(&self, indicator_code: &str) -> Result<Vec<ApiRecord>> {
        log::info!("Fetching World Bank data for indicator '{}'", indicator_code);

        let mut page = 1;
        let mut total_pages = 1;
        let mut records = Vec::new();

        while page <= total_pages {
            let body = self.get_text(&self.page_url(indicator_code, page), false).await?;
            match parse_page(&body)? {
                Some(parsed) if !parsed.records.is_empty() => {
                    log::debug!(
                        "{}: page {}/{} with {} records",
                        indicator_code,
                        page,
                        parsed.pages,
                        parsed.records.len()
                    );
                    records.extend(parsed.records);
                    total_pages = parsed.pages;
                    page += 1;
                    if page <= total_pages && self.config.page_delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(self.config.page_delay_ms)).await;
                    }
                }
                _ => break,
            }
        }

        if records.is_empty() {
            log::warn!(
                "No records found for indicator '{}' after all pages were checked",
                indicator_code
            );
        }
        Ok(records)
    }

    /// Download the policy dashboard page as raw text.
    pub async fn fetch_policy_page(&self) -> Result<String> {
        self.get_text(&self.config.policy_url, true).await
    }

    async fn get_text(&self, url: &str, browser_agent: bool) -> Result<String> {
        let mut request = self.client.get(url);
        if browser_agent {
            request = request.header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Pagination metadata, the first element of every response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCountry {
    #[serde(default)]
    pub id: String,
    pub value: String,
}

/// One observation as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecord {
    pub country: ApiCountry,
    #[serde(rename = "countryiso3code", default)]
    pub country_iso: String,
    pub date: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub pages: u32,
    pub records: Vec<ApiRecord>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    id: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessageEnvelope {
    message: Vec<ApiMessage>,
}

/// Parse one `[metadata, records]` response body.
///
/// Returns `None` when the response carries no records (a `null` second
/// element or a short array) and an API error when the service answered
/// with a message envelope instead of data.
pub fn parse_page(body: &str) -> Result<Option<Page>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let serde_json::Value::Array(mut parts) = value else {
        return Err(Error::Api("expected a JSON array response".to_string()));
    };

    if parts.len() < 2 {
        return match parts.pop() {
            Some(first) => match serde_json::from_value::<ApiMessageEnvelope>(first) {
                Ok(envelope) => Err(Error::Api(
                    envelope
                        .message
                        .iter()
                        .map(|m| format!("{} {}", m.id, m.value).trim().to_string())
                        .collect::<Vec<_>>()
                        .join("; "),
                )),
                Err(_) => Ok(None),
            },
            None => Ok(None),
        };
    }

    let records_value = parts.swap_remove(1);
    let meta: PageMeta = serde_json::from_value(parts.swap_remove(0))?;
    let records: Option<Vec<ApiRecord>> = serde_json::from_value(records_value)?;

    Ok(records.map(|records| Page {
        pages: meta.pages,
        records,
    }))
}

/// Convert API observations into raw records.
///
/// Observations without a value, without an ISO code, or with a
/// non-numeric date are dropped. `countries` optionally restricts the
/// output to the listed ISO codes.
pub fn to_indicator_records(
    records: Vec<ApiRecord>,
    countries: Option<&[String]>,
) -> Vec<IndicatorRecord> {
    records
        .into_iter()
        .filter(|r| !r.country_iso.trim().is_empty())
        .filter(|r| countries.is_none_or(|allowed| allowed.iter().any(|c| *c == r.country_iso)))
        .filter_map(|r| {
            let value = r.value?;
            let year = r.date.trim().parse::<i32>().ok()?;
            Some(IndicatorRecord::new(r.country.value, r.country_iso, year, Some(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const PAGE: &str = indoc! {r#"
        [
          {"page": 1, "pages": 2, "per_page": "500", "total": 3, "sourceid": "2"},
          [
            {"indicator": {"id": "NY.GDP.PCAP.KD", "value": "GDP per capita"},
             "country": {"id": "US", "value": "United States"},
             "countryiso3code": "USA", "date": "2022", "value": 65020.35,
             "unit": "", "obs_status": "", "decimal": 1},
            {"indicator": {"id": "NY.GDP.PCAP.KD", "value": "GDP per capita"},
             "country": {"id": "US", "value": "United States"},
             "countryiso3code": "USA", "date": "2023", "value": null,
             "unit": "", "obs_status": "", "decimal": 1},
            {"indicator": {"id": "NY.GDP.PCAP.KD", "value": "GDP per capita"},
             "country": {"id": "1W", "value": "World"},
             "countryiso3code": "", "date": "2022", "value": 11000.0,
             "unit": "", "obs_status": "", "decimal": 1}
          ]
        ]
    "#};

    fn client() -> WorldBankClient {
        WorldBankClient::new(CollectorConfig::default()).unwrap()
    }

    #[test]
    fn test_page_url() {
        assert_eq!(
            client().page_url("IT.NET.USER.ZS", 3),
            "http://api.worldbank.org/v2/country/all/indicator/IT.NET.USER.ZS?format=json&per_page=500&page=3"
        );
    }

    #[test]
    fn test_parse_page_with_records() {
        let page = parse_page(PAGE).unwrap().unwrap();
        assert_eq!(page.pages, 2);
        assert_eq!(page.records.len(), 3);
        assert_eq!(page.records[0].country_iso, "USA");
        assert_eq!(page.records[1].value, None);
    }

    #[test]
    fn test_parse_page_null_records() {
        let body = r#"[{"page": 3, "pages": 2, "per_page": "500", "total": 0}, null]"#;
        assert!(parse_page(body).unwrap().is_none());
    }

    #[test]
    fn test_parse_page_error_envelope() {
        let body = r#"[{"message": [{"id": "120", "key": "Invalid value", "value": "The provided parameter value is not valid"}]}]"#;
        let err = parse_page(body).unwrap_err();
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_parse_page_rejects_non_array() {
        assert!(matches!(parse_page(r#"{"ok": true}"#), Err(Error::Api(_))));
    }

    #[test]
    fn test_to_indicator_records_drops_unusable() {
        let page = parse_page(PAGE).unwrap().unwrap();
        let records = to_indicator_records(page.records, None);
        assert_eq!(
            records,
            vec![IndicatorRecord::new("United States", "USA", 2022, Some(65020.35))]
        );
    }

    #[test]
    fn test_to_indicator_records_country_filter() {
        let page = parse_page(PAGE).unwrap().unwrap();
        let allowed = vec!["DEU".to_string()];
        assert!(to_indicator_records(page.records, Some(&allowed)).is_empty());
    }
}
