use serde_json::Value;

use shelf_domain::{AttributeFacets, CategoryNode, CategoryTree, FacetBucket};

use crate::{
	Error, Result,
	search::{MISSING_FIELD, ProductView, SearchResult},
};

/// Flattens a raw engine response into a [`SearchResult`]. Pure and
/// idempotent; only missing top-level keys fail, individual malformed buckets
/// or absent hit fields are handled in place.
pub fn normalize(raw: &Value) -> Result<SearchResult> {
	let total = raw
		.pointer("/hits/total/value")
		.and_then(Value::as_u64)
		.ok_or_else(|| shape_error("hits.total.value"))?;
	let hits = raw
		.pointer("/hits/hits")
		.and_then(Value::as_array)
		.ok_or_else(|| shape_error("hits.hits"))?;
	let aggregations = raw.get("aggregations").ok_or_else(|| shape_error("aggregations"))?;
	let l1 = aggregations.get("l1").ok_or_else(|| shape_error("aggregations.l1"))?;
	let inventory_agg = aggregations
		.get("inventory_status")
		.ok_or_else(|| shape_error("aggregations.inventory_status"))?;
	let attribute_agg =
		aggregations.get("attributes").ok_or_else(|| shape_error("aggregations.attributes"))?;

	Ok(SearchResult {
		total,
		products: hits.iter().map(product_view).collect(),
		inventory: facet_buckets(inventory_agg),
		categories: category_tree(l1),
		attributes: attribute_facets(attribute_agg),
	})
}

fn shape_error(key: &str) -> Error {
	Error::MalformedResponse { message: format!("Response is missing {key}.") }
}

fn product_view(hit: &Value) -> ProductView {
	let source = hit.get("_source").unwrap_or(&Value::Null);

	ProductView {
		// The original renders an untitled card for a missing title, so the
		// placeholder stays out of it.
		title: str_field(source, "title").unwrap_or_default(),
		category_raw: source
			.pointer("/category/raw")
			.and_then(Value::as_str)
			.unwrap_or(MISSING_FIELD)
			.to_string(),
		inventory_status: str_field(source, "inventory_status")
			.unwrap_or_else(|| MISSING_FIELD.to_string()),
		supplier_rating: display_field(source, "supplier_rating"),
		description: display_field(source, "description"),
		attributes: attribute_pairs(source),
	}
}

fn str_field(source: &Value, key: &str) -> Option<String> {
	source.get(key).and_then(Value::as_str).map(str::to_string)
}

/// String or numeric field rendered for display; anything else becomes the
/// placeholder.
fn display_field(source: &Value, key: &str) -> String {
	match source.get(key) {
		Some(Value::String(text)) => text.clone(),
		Some(Value::Number(number)) => number.to_string(),
		_ => MISSING_FIELD.to_string(),
	}
}

fn attribute_pairs(source: &Value) -> Vec<(String, String)> {
	let Some(entries) = source.get("attributes").and_then(Value::as_array) else {
		return Vec::new();
	};
	let mut pairs = Vec::with_capacity(entries.len());

	for entry in entries {
		let name = entry.get("name").and_then(Value::as_str);
		let value = entry.get("value").and_then(Value::as_str);

		match (name, value) {
			(Some(name), Some(value)) => pairs.push((name.to_string(), value.to_string())),
			_ => tracing::warn!("Skipping attribute entry without name/value."),
		}
	}

	pairs
}

/// Walks the l1 → l2 → l3 aggregation into a tree, preserving bucket order as
/// returned by the engine.
pub(crate) fn category_tree(l1_agg: &Value) -> CategoryTree {
	CategoryTree { roots: category_nodes(l1_agg, &["l2", "l3"]) }
}

fn category_nodes(agg: &Value, child_levels: &[&str]) -> Vec<CategoryNode> {
	let mut nodes = Vec::new();

	for bucket in buckets(agg) {
		let Some(key) = bucket.get("key").and_then(Value::as_str) else {
			tracing::warn!("Skipping category bucket without a key.");

			continue;
		};
		let doc_count = bucket.get("doc_count").and_then(Value::as_u64).unwrap_or(0);
		let children = match child_levels.split_first() {
			Some((level, rest)) =>
				bucket.get(*level).map(|child| category_nodes(child, rest)).unwrap_or_default(),
			None => Vec::new(),
		};

		nodes.push(CategoryNode { key: key.to_string(), doc_count, children });
	}

	nodes
}

/// Two-level walk of the nested attribute aggregation: name bucket → value
/// buckets. The names surfaced here are the caller's candidate filter keys
/// for the next interaction.
fn attribute_facets(attribute_agg: &Value) -> AttributeFacets {
	let mut facets = AttributeFacets::default();

	for bucket in buckets(attribute_agg.get("names").unwrap_or(&Value::Null)) {
		let Some(name) = bucket.get("key").and_then(Value::as_str) else {
			tracing::warn!("Skipping attribute name bucket without a key.");

			continue;
		};
		let values = facet_buckets(bucket.get("values").unwrap_or(&Value::Null));

		facets.insert(name, values);
	}

	facets
}

fn facet_buckets(agg: &Value) -> Vec<FacetBucket> {
	buckets(agg)
		.iter()
		.filter_map(|bucket| {
			let value = bucket.get("key").and_then(Value::as_str)?;
			let count = bucket.get("doc_count").and_then(Value::as_u64).unwrap_or(0);

			Some(FacetBucket::new(value, count))
		})
		.collect()
}

fn buckets(agg: &Value) -> &[Value] {
	agg.get("buckets").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}
