use std::{
	collections::VecDeque,
	sync::Mutex,
};

use serde_json::{Map, Value, json};

use shelf_service::{BoxFuture, SearchEngine};

#[derive(Clone, Debug)]
pub struct RecordedCall {
	pub index: String,
	pub body: Value,
}

/// In-memory [`SearchEngine`] for tests. Records every call and replays
/// queued responses in order; an empty queue yields a canned zero-hit
/// response.
#[derive(Default)]
pub struct MockEngine {
	calls: Mutex<Vec<RecordedCall>>,
	responses: Mutex<VecDeque<shelf_engine::Result<Value>>>,
}
impl MockEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_response(&self, response: Value) {
		self.lock_responses().push_back(Ok(response));
	}

	pub fn push_error(&self, error: shelf_engine::Error) {
		self.lock_responses().push_back(Err(error));
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	/// The body of the only recorded call; panics when the call count is not
	/// exactly one.
	pub fn single_body(&self) -> Value {
		let calls = self.calls();

		assert_eq!(calls.len(), 1, "expected exactly one engine call");

		calls[0].body.clone()
	}

	fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<shelf_engine::Result<Value>>> {
		self.responses.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl SearchEngine for MockEngine {
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, shelf_engine::Result<Value>> {
		self.calls
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.push(RecordedCall { index: index.to_string(), body: body.clone() });

		let response = self.lock_responses().pop_front().unwrap_or_else(|| Ok(empty_response()));

		Box::pin(async move { response })
	}
}

/// A well-formed zero-hit response carrying every aggregation the service
/// requests.
pub fn empty_response() -> Value {
	search_response(0, Vec::new())
}

/// A well-formed response with the standard (empty) aggregation block; use
/// [`with_aggregations`] to splice facet buckets in.
pub fn search_response(total: u64, hits: Vec<Value>) -> Value {
	json!({
		"took": 3,
		"timed_out": false,
		"hits": {
			"total": { "value": total, "relation": "eq" },
			"hits": hits
		},
		"aggregations": {
			"l1": { "buckets": [] },
			"inventory_status": { "buckets": [] },
			"attributes": { "doc_count": 0, "names": { "buckets": [] } }
		}
	})
}

/// Replaces aggregation entries of a response built by [`search_response`].
pub fn with_aggregations(mut response: Value, aggregations: Map<String, Value>) -> Value {
	if let Some(existing) =
		response.get_mut("aggregations").and_then(Value::as_object_mut)
	{
		existing.extend(aggregations);
	}

	response
}

pub fn hit(source: Value) -> Value {
	json!({ "_index": "products", "_score": 1.0, "_source": source })
}

pub fn term_bucket(key: &str, doc_count: u64) -> Value {
	json!({ "key": key, "doc_count": doc_count })
}

/// A terms bucket with one nested sub-aggregation, e.g. an `l1` bucket whose
/// `l2` child holds the next level's buckets.
pub fn nested_bucket(key: &str, doc_count: u64, child_name: &str, children: Vec<Value>) -> Value {
	let mut bucket = Map::new();

	bucket.insert("key".to_string(), json!(key));
	bucket.insert("doc_count".to_string(), json!(doc_count));
	bucket.insert(child_name.to_string(), json!({ "buckets": children }));

	Value::Object(bucket)
}
