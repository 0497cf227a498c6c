use serde_json::json;

use shelf_domain::CategoryTree;

use crate::{
	Error, Result, ShelfService,
	search::{query, response},
};

impl ShelfService {
	/// Discovers the full three-level category tree with a zero-hit,
	/// aggregation-only query. Used to populate the cascading category
	/// selectors before any search runs.
	pub async fn category_hierarchy(&self) -> Result<CategoryTree> {
		let body = json!({
			"size": 0,
			"aggs": { "l1": query::category_aggregation(self.cfg.search.hierarchy_level_sizes) }
		});
		let raw =
			self.engine.search(&self.cfg.engine.index, &body).await.map_err(|err| match err {
				shelf_engine::Error::Malformed { message } => Error::MalformedResponse { message },
				// Connection failures and rejected queries are equally fatal
				// to hierarchy population.
				other => Error::EngineUnavailable { message: other.to_string() },
			})?;
		let l1 = raw
			.pointer("/aggregations/l1")
			.ok_or_else(|| Error::MalformedResponse {
				message: "Hierarchy response is missing aggregations.l1.".to_string(),
			})?;

		Ok(response::category_tree(l1))
	}

	/// Degraded variant for option population: a failed fetch logs and yields
	/// an empty tree instead of taking the whole interaction down.
	pub async fn category_hierarchy_or_empty(&self) -> CategoryTree {
		match self.category_hierarchy().await {
			Ok(tree) => tree,
			Err(err) => {
				tracing::warn!(error = %err, "Falling back to an empty category tree.");

				CategoryTree::default()
			},
		}
	}
}
