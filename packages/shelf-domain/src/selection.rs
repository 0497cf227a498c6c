use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The presentation layer's "no selection" label for category levels and
/// attribute values.
pub const ANY_SENTINEL: &str = "(Any)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStrategy {
	/// Nothing to search for; no engine call is made.
	NoOp,
	FilterOnly,
	RetrieverLinear,
	Hybrid,
}
impl QueryStrategy {
	/// The complete strategy table. No other inputs influence the choice.
	pub fn select(has_text: bool, has_filters: bool) -> Self {
		match (has_text, has_filters) {
			(false, false) => Self::NoOp,
			(false, true) => Self::FilterOnly,
			(true, false) => Self::RetrieverLinear,
			(true, true) => Self::Hybrid,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::NoOp => "no_op",
			Self::FilterOnly => "filter_only",
			Self::RetrieverLinear => "retriever_linear",
			Self::Hybrid => "hybrid",
		}
	}
}

/// Concrete category selections down the l1 → l2 → l3 cascade. Level N is
/// meaningful only while level N−1 is concrete; [`CategoryPath::from_labels`]
/// enforces that by dropping orphaned levels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPath {
	pub l1: Option<String>,
	pub l2: Option<String>,
	pub l3: Option<String>,
}
impl CategoryPath {
	pub fn from_labels(l1: &str, l2: &str, l3: &str) -> Self {
		let l1 = concrete(l1);
		let l2 = l1.as_ref().and_then(|_| concrete(l2));
		let l3 = l2.as_ref().and_then(|_| concrete(l3));

		Self { l1, l2, l3 }
	}

	pub fn is_empty(&self) -> bool {
		self.l1.is_none()
	}

	pub fn depth(&self) -> usize {
		[&self.l1, &self.l2, &self.l3].into_iter().filter(|level| level.is_some()).count()
	}
}

/// One user interaction's worth of search input. Constructed fresh per
/// interaction and never mutated after being handed to the query builder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSelection {
	pub query: String,
	pub category: CategoryPath,
	pub inventory: BTreeSet<String>,
	/// Attribute name → selected value. The key set is only known at runtime:
	/// the caller populates it from the attribute facets of a prior result.
	pub attributes: BTreeMap<String, String>,
}
impl SearchSelection {
	/// Builds a selection from raw widget labels, mapping the `"(Any)"`
	/// sentinel to "not selected" for category levels and attribute values.
	pub fn from_ui_labels<'a, I, A>(
		query: &str,
		l1: &str,
		l2: &str,
		l3: &str,
		inventory: I,
		attributes: A,
	) -> Self
	where
		I: IntoIterator<Item = &'a str>,
		A: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let inventory = inventory
			.into_iter()
			.filter(|status| !status.trim().is_empty())
			.map(str::to_string)
			.collect();
		let attributes = attributes
			.into_iter()
			.filter_map(|(name, value)| Some((name.to_string(), concrete(value)?)))
			.collect();

		Self {
			query: query.trim().to_string(),
			category: CategoryPath::from_labels(l1, l2, l3),
			inventory,
			attributes,
		}
	}

	pub fn has_text(&self) -> bool {
		!self.query.trim().is_empty()
	}

	pub fn has_filters(&self) -> bool {
		self.active_filter_count() > 0
	}

	/// Number of filter clauses this selection assembles into: one per
	/// concrete category level, one for a non-empty inventory set, one per
	/// selected attribute.
	pub fn active_filter_count(&self) -> usize {
		self.category.depth() + usize::from(!self.inventory.is_empty()) + self.attributes.len()
	}

	pub fn strategy(&self) -> QueryStrategy {
		QueryStrategy::select(self.has_text(), self.has_filters())
	}
}

fn concrete(label: &str) -> Option<String> {
	let trimmed = label.trim();

	if trimmed.is_empty() || trimmed == ANY_SENTINEL { None } else { Some(trimmed.to_string()) }
}
