pub mod filter;
pub mod query;
pub mod response;

use serde::{Deserialize, Serialize};

use shelf_domain::{AttributeFacets, CategoryTree, FacetBucket, SearchSelection};

use crate::{Error, Result, ShelfService};

/// Placeholder rendered for hit fields the document does not carry. Field
/// absence is display state, never an error.
pub const MISSING_FIELD: &str = "—";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
	pub title: String,
	pub category_raw: String,
	pub inventory_status: String,
	pub supplier_rating: String,
	pub description: String,
	pub attributes: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
	pub total: u64,
	pub products: Vec<ProductView>,
	pub inventory: Vec<FacetBucket>,
	pub categories: CategoryTree,
	pub attributes: AttributeFacets,
}

impl ShelfService {
	/// Runs one search interaction: select the strategy, assemble filters,
	/// build the body, make exactly one engine call, normalize. `Ok(None)`
	/// means the selection was empty and no query was executed.
	pub async fn search(&self, selection: &SearchSelection) -> Result<Option<SearchResult>> {
		let strategy = selection.strategy();
		let filters = filter::assemble(selection);
		let Some(body) = query::build(strategy, selection.query.trim(), &filters, &self.cfg.search)
		else {
			tracing::debug!("No text and no filters; skipping the engine call.");

			return Ok(None);
		};

		tracing::debug!(
			strategy = strategy.as_str(),
			filters = filters.len(),
			"Executing product search."
		);

		let raw = self
			.engine
			.search(&self.cfg.engine.index, &body)
			.await
			.map_err(|err| Error::from_engine(err, strategy.as_str()))?;

		response::normalize(&raw).map(Some)
	}
}
