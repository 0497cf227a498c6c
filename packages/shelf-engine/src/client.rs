use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap},
};
use serde_json::Value;

use crate::{Error, Result};

/// HTTP client for an Elasticsearch-compatible engine. Holds a pooled
/// connection; cheap to clone and reuse across requests.
#[derive(Clone)]
pub struct EngineClient {
	http: Client,
	endpoint: String,
}
impl EngineClient {
	pub fn new(cfg: &shelf_config::Engine) -> Result<Self> {
		let mut headers = HeaderMap::new();

		if let Some(api_key) = cfg.api_key.as_deref() {
			headers.insert(AUTHORIZATION, format!("ApiKey {api_key}").parse()?);
		}

		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(headers)
			.build()?;

		Ok(Self { http, endpoint: cfg.endpoint.trim_end_matches('/').to_string() })
	}

	/// Verifies the engine is reachable and the credentials are accepted.
	pub async fn ping(&self) -> Result<()> {
		let res = self.http.get(&self.endpoint).send().await?;
		let status = res.status();

		if !status.is_success() {
			return Err(Error::Unavailable { message: format!("ping returned {status}.") });
		}

		Ok(())
	}

	/// One `_search` round trip. No retries; retry policy is the caller's
	/// concern.
	pub async fn search(&self, index: &str, body: &Value) -> Result<Value> {
		let url = format!("{}/{index}/_search", self.endpoint);
		let res = self.http.post(url).json(body).send().await?;
		let status = res.status();

		if !status.is_success() {
			let reason = res
				.json::<Value>()
				.await
				.ok()
				.as_ref()
				.and_then(rejection_reason)
				.unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

			return Err(Error::Rejected { status: status.as_u16(), reason });
		}

		res.json::<Value>()
			.await
			.map_err(|err| Error::Malformed { message: err.to_string() })
	}
}

fn rejection_reason(body: &Value) -> Option<String> {
	let error = body.get("error")?;

	if let Some(reason) = error.get("reason").and_then(Value::as_str) {
		return Some(reason.to_string());
	}
	if let Some(reason) = error
		.pointer("/root_cause/0/reason")
		.and_then(Value::as_str)
	{
		return Some(reason.to_string());
	}

	error.as_str().map(str::to_string)
}
