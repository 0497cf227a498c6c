use std::sync::Arc;

use serde_json::{Value, json};

use shelf_config::{Config, Engine, Search};
use shelf_domain::{ANY_SENTINEL, QueryStrategy, SearchSelection};
use shelf_service::{Error, MISSING_FIELD, ShelfService, search::response};
use shelf_testkit::{MockEngine, hit, nested_bucket, search_response, term_bucket, with_aggregations};

fn test_config() -> Config {
	Config {
		engine: Engine {
			endpoint: "http://localhost:9200".to_string(),
			api_key: None,
			timeout_ms: 1_000,
			index: "products".to_string(),
		},
		search: Search::default(),
	}
}

fn service(engine: &Arc<MockEngine>) -> ShelfService {
	ShelfService::new(test_config(), engine.clone())
}

#[tokio::test]
async fn noop_selection_makes_no_engine_call() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::default();

	assert_eq!(selection.strategy(), QueryStrategy::NoOp);

	let result = service.search(&selection).await.expect("no-op search must not fail");

	assert_eq!(result, None);
	assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn filter_only_body_matches_active_selection_count() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::from_ui_labels(
		"",
		"Electronics",
		"Phones",
		ANY_SENTINEL,
		["in_stock"],
		[("Color", "Red")],
	);

	assert_eq!(selection.strategy(), QueryStrategy::FilterOnly);

	service.search(&selection).await.expect("search must succeed").expect("result expected");

	let body = engine.single_body();
	let filters = body
		.pointer("/query/bool/filter")
		.and_then(Value::as_array)
		.expect("filter-only body carries bool.filter");

	assert_eq!(filters.len(), selection.active_filter_count());
	assert_eq!(body.pointer("/query/bool/must"), None);
	assert_eq!(engine.calls()[0].index, "products");
}

#[tokio::test]
async fn text_only_selects_linear_retriever() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::from_ui_labels(
		"usb charger",
		ANY_SENTINEL,
		ANY_SENTINEL,
		ANY_SENTINEL,
		[],
		[],
	);

	assert_eq!(selection.strategy(), QueryStrategy::RetrieverLinear);

	service.search(&selection).await.expect("search must succeed");

	let body = engine.single_body();

	assert_eq!(body.get("query"), None);
	assert_eq!(body.pointer("/retriever/linear/rank_window_size"), Some(&json!(30)));
}

#[tokio::test]
async fn hybrid_combines_text_filters_and_semantic_boost() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::from_ui_labels(
		"usb charger",
		"Electronics",
		ANY_SENTINEL,
		ANY_SENTINEL,
		[],
		[("Color", "Red")],
	);

	assert_eq!(selection.strategy(), QueryStrategy::Hybrid);

	service.search(&selection).await.expect("search must succeed");

	let body = engine.single_body();
	let fields = body
		.pointer("/query/bool/must/0/multi_match/fields")
		.and_then(Value::as_array)
		.expect("hybrid must clause is the multi_match");

	assert_eq!(fields[0], json!("title^3"));
	assert_eq!(body.pointer("/query/bool/should/0/semantic/boost"), Some(&json!(3.0)));
	assert_eq!(
		body.pointer("/query/bool/filter").and_then(Value::as_array).map(Vec::len),
		Some(2)
	);
}

#[tokio::test]
async fn nested_attribute_filter_scopes_both_terms_together() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::from_ui_labels(
		"",
		ANY_SENTINEL,
		ANY_SENTINEL,
		ANY_SENTINEL,
		[],
		[("Color", "Red")],
	);

	service.search(&selection).await.expect("search must succeed");

	let body = engine.single_body();
	let filters = body
		.pointer("/query/bool/filter")
		.and_then(Value::as_array)
		.expect("bool.filter expected");

	assert_eq!(filters.len(), 1);

	let musts = filters[0]
		.pointer("/nested/query/bool/must")
		.and_then(Value::as_array)
		.expect("one nested scope with a bool.must");

	assert_eq!(filters[0].pointer("/nested/path"), Some(&json!("attributes")));
	assert!(musts.contains(&json!({ "term": { "attributes.name": "Color" } })));
	assert!(musts.contains(&json!({ "term": { "attributes.value": "Red" } })));
}

#[tokio::test]
async fn hierarchy_round_trip_builds_the_cascade() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let response = with_aggregations(
		search_response(0, Vec::new()),
		[(
			"l1".to_string(),
			json!({
				"buckets": [nested_bucket(
					"Electronics",
					42,
					"l2",
					vec![nested_bucket(
						"Phones",
						30,
						"l3",
						vec![term_bucket("5G", 20), term_bucket("4G", 10)],
					)],
				)]
			}),
		)]
		.into_iter()
		.collect(),
	);

	engine.push_response(response);

	let tree = service.category_hierarchy().await.expect("hierarchy fetch must succeed");

	assert_eq!(tree.level1_options(), ["Electronics"]);
	assert_eq!(tree.level2_options("Electronics"), ["Phones"]);
	assert_eq!(tree.level3_options("Electronics", "Phones"), ["5G", "4G"]);

	let body = engine.single_body();

	assert_eq!(body.get("size"), Some(&json!(0)));
	assert_eq!(body.pointer("/aggs/l1/terms/size"), Some(&json!(100)));
	assert_eq!(body.pointer("/aggs/l1/aggs/l2/terms/size"), Some(&json!(200)));
	assert_eq!(body.pointer("/aggs/l1/aggs/l2/aggs/l3/terms/size"), Some(&json!(300)));
}

#[tokio::test]
async fn hierarchy_failure_degrades_to_an_empty_tree() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);

	engine.push_error(shelf_engine::Error::Unavailable {
		message: "connection refused".to_string(),
	});

	let fatal = service.category_hierarchy().await;

	assert!(matches!(fatal, Err(Error::EngineUnavailable { .. })));

	engine.push_error(shelf_engine::Error::Unavailable {
		message: "connection refused".to_string(),
	});

	let tree = service.category_hierarchy_or_empty().await;

	assert!(tree.is_empty());
}

#[tokio::test]
async fn missing_supplier_rating_renders_the_placeholder() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::from_ui_labels(
		"charger",
		ANY_SENTINEL,
		ANY_SENTINEL,
		ANY_SENTINEL,
		[],
		[],
	);

	engine.push_response(search_response(
		2,
		vec![
			hit(json!({ "title": "Charger A", "description": "65W." })),
			hit(json!({ "title": "Charger B", "description": "30W." })),
		],
	));

	let result = service
		.search(&selection)
		.await
		.expect("search must succeed")
		.expect("result expected");

	assert_eq!(result.total, 2);
	assert_eq!(result.products.len(), 2);

	for product in &result.products {
		assert_eq!(product.supplier_rating, MISSING_FIELD);
	}
}

#[tokio::test]
async fn attribute_facets_feed_the_next_selection() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::from_ui_labels(
		"charger",
		ANY_SENTINEL,
		ANY_SENTINEL,
		ANY_SENTINEL,
		[],
		[],
	);
	let response = with_aggregations(
		search_response(1, vec![hit(json!({ "title": "Charger" }))]),
		[(
			"attributes".to_string(),
			json!({
				"doc_count": 2,
				"names": {
					"buckets": [nested_bucket(
						"Color",
						2,
						"values",
						vec![term_bucket("Red", 1), term_bucket("White", 1)],
					)]
				}
			}),
		)]
		.into_iter()
		.collect(),
	);

	engine.push_response(response);

	let result = service
		.search(&selection)
		.await
		.expect("search must succeed")
		.expect("result expected");
	let names: Vec<&str> = result.attributes.names().collect();

	assert_eq!(names, ["Color"]);

	// The caller narrows the next interaction with a facet-discovered name.
	let next = SearchSelection::from_ui_labels(
		"charger",
		ANY_SENTINEL,
		ANY_SENTINEL,
		ANY_SENTINEL,
		[],
		[("Color", "Red")],
	);

	assert_eq!(next.strategy(), QueryStrategy::Hybrid);
}

#[tokio::test]
async fn rejected_query_surfaces_the_offending_strategy() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::from_ui_labels(
		"charger",
		ANY_SENTINEL,
		ANY_SENTINEL,
		ANY_SENTINEL,
		[],
		[],
	);

	engine.push_error(shelf_engine::Error::Rejected {
		status: 400,
		reason: "parsing_exception".to_string(),
	});

	match service.search(&selection).await {
		Err(Error::QueryExecution { strategy, message }) => {
			assert_eq!(strategy, "retriever_linear");
			assert!(message.contains("parsing_exception"));
		},
		other => panic!("expected QueryExecution, got {other:?}"),
	}
}

#[tokio::test]
async fn unreachable_engine_surfaces_unavailable() {
	let engine = Arc::new(MockEngine::new());
	let service = service(&engine);
	let selection = SearchSelection::from_ui_labels(
		"charger",
		ANY_SENTINEL,
		ANY_SENTINEL,
		ANY_SENTINEL,
		[],
		[],
	);

	engine.push_error(shelf_engine::Error::Unavailable {
		message: "connection refused".to_string(),
	});

	assert!(matches!(
		service.search(&selection).await,
		Err(Error::EngineUnavailable { .. })
	));
}

#[tokio::test]
async fn normalization_is_idempotent_across_calls() {
	let raw = search_response(1, vec![hit(json!({ "title": "Charger" }))]);
	let first = response::normalize(&raw).expect("well-formed response");
	let second = response::normalize(&raw).expect("well-formed response");

	assert_eq!(first, second);
}
