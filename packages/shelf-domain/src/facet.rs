use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One aggregation bucket: a field value paired with its document count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
	pub value: String,
	pub count: u64,
}
impl FacetBucket {
	pub fn new(value: impl Into<String>, count: u64) -> Self {
		Self { value: value.into(), count }
	}
}

/// Attribute name → value buckets, both capped by the engine aggregation
/// size. The name set here is what the caller offers as attribute filter
/// candidates on the next interaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFacets(pub BTreeMap<String, Vec<FacetBucket>>);
impl AttributeFacets {
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn values(&self, name: &str) -> &[FacetBucket] {
		self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn insert(&mut self, name: impl Into<String>, buckets: Vec<FacetBucket>) {
		self.0.insert(name.into(), buckets);
	}
}
