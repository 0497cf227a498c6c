use serde_json::{Map, Value, json};

use shelf_config::Search;
use shelf_domain::QueryStrategy;

/// Builds the full query body for the selected strategy, or `None` for
/// [`QueryStrategy::NoOp`]. Every body carries the result cap and the
/// standard aggregation block.
pub fn build(
	strategy: QueryStrategy,
	text: &str,
	filters: &[Value],
	cfg: &Search,
) -> Option<Value> {
	let (key, clause) = match strategy {
		QueryStrategy::NoOp => return None,
		// Pure filter match; no scoring text clause. Ordering is the engine
		// default, tie-broken by internal document order.
		QueryStrategy::FilterOnly => ("query", json!({ "bool": { "filter": filters } })),
		QueryStrategy::RetrieverLinear => ("retriever", linear_retriever(text, cfg)),
		QueryStrategy::Hybrid => ("query", hybrid_query(text, filters, cfg)),
	};
	let mut body = Map::new();

	body.insert("size".to_string(), json!(cfg.result_size));
	body.insert(key.to_string(), clause);
	body.insert("aggs".to_string(), aggregations(cfg));

	Some(Value::Object(body))
}

/// The text match must hit; filters gate without scoring; the semantic clause
/// only boosts ranking, it is never mandatory.
fn hybrid_query(text: &str, filters: &[Value], cfg: &Search) -> Value {
	json!({
		"bool": {
			"must": [multi_match(text, cfg)],
			"filter": filters,
			"should": [semantic(text, cfg)]
		}
	})
}

/// Linear blend of a semantic-field match and the fuzzy lexical match, with
/// min-max score normalization across the two sub-retrievers.
fn linear_retriever(text: &str, cfg: &Search) -> Value {
	json!({
		"linear": {
			"rank_window_size": cfg.rank_window_size,
			"retrievers": [
				{
					"retriever": {
						"standard": { "query": { "match": { "semantic_search": text } } }
					},
					"normalizer": "minmax"
				},
				{
					"retriever": { "standard": { "query": multi_match(text, cfg) } },
					"normalizer": "minmax"
				}
			]
		}
	})
}

fn multi_match(text: &str, cfg: &Search) -> Value {
	json!({
		"multi_match": {
			"query": text,
			"fields": [format!("title^{}", cfg.title_boost), "description", "category.raw"],
			"type": "best_fields",
			"operator": "or",
			"fuzziness": "AUTO",
			"prefix_length": 1
		}
	})
}

fn semantic(text: &str, cfg: &Search) -> Value {
	json!({
		"semantic": {
			"field": "semantic_search",
			"query": text,
			"boost": cfg.semantic_boost
		}
	})
}

/// The standard aggregation block: three-level category facet, inventory
/// facet, and the dynamic nested-attribute facet.
fn aggregations(cfg: &Search) -> Value {
	json!({
		"l1": category_aggregation(cfg.facet_level_sizes),
		"inventory_status": {
			"terms": { "field": "inventory_status", "size": cfg.inventory_agg_size }
		},
		"attributes": {
			"nested": { "path": "attributes" },
			"aggs": {
				"names": {
					"terms": { "field": "attributes.name", "size": cfg.attribute_agg_size },
					"aggs": {
						"values": {
							"terms": {
								"field": "attributes.value",
								"size": cfg.attribute_agg_size
							}
						}
					}
				}
			}
		}
	})
}

/// Three-level nested terms aggregation over `category.l1/l2/l3`. Shared by
/// the search bodies and the dedicated hierarchy fetch, which differ only in
/// bucket caps.
pub fn category_aggregation(sizes: [u32; 3]) -> Value {
	let [l1, l2, l3] = sizes;

	json!({
		"terms": { "field": "category.l1", "size": l1 },
		"aggs": {
			"l2": {
				"terms": { "field": "category.l2", "size": l2 },
				"aggs": {
					"l3": { "terms": { "field": "category.l3", "size": l3 } }
				}
			}
		}
	})
}
