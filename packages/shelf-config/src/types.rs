use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub engine: Engine,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Engine {
	pub endpoint: String,
	/// Optional. Sent as an `Authorization: ApiKey …` header when present.
	pub api_key: Option<String>,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default = "default_index")]
	pub index: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Result cap for every search body.
	pub result_size: u32,
	pub rank_window_size: u32,
	pub title_boost: f32,
	pub semantic_boost: f32,
	/// Breadth cap for the nested attribute aggregation, applied to both
	/// attribute names and values per name. Intentionally small; the facet is
	/// an approximation, not an exhaustive enumeration.
	pub attribute_agg_size: u32,
	/// Bucket caps for the l1/l2/l3 category facet attached to search bodies.
	pub facet_level_sizes: [u32; 3],
	/// Bucket caps for the dedicated category hierarchy fetch.
	pub hierarchy_level_sizes: [u32; 3],
	pub inventory_agg_size: u32,
}

impl Default for Search {
	fn default() -> Self {
		Self {
			result_size: 30,
			rank_window_size: 30,
			title_boost: 3.0,
			semantic_boost: 3.0,
			attribute_agg_size: 3,
			facet_level_sizes: [10, 20, 30],
			hierarchy_level_sizes: [100, 200, 300],
			inventory_agg_size: 10,
		}
	}
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_index() -> String {
	"products".to_string()
}
