use serde_json::{Value, json};

use shelf_domain::SearchSelection;

/// Turns a selection into engine-native filter clauses. Clause order follows
/// insertion order (category l1 → l3, inventory, attributes); the engine
/// combines them with AND semantics regardless.
pub fn assemble(selection: &SearchSelection) -> Vec<Value> {
	let mut clauses = Vec::new();

	if let Some(l1) = selection.category.l1.as_deref() {
		clauses.push(json!({ "term": { "category.l1": l1 } }));
	}
	if let Some(l2) = selection.category.l2.as_deref() {
		clauses.push(json!({ "term": { "category.l2": l2 } }));
	}
	if let Some(l3) = selection.category.l3.as_deref() {
		clauses.push(json!({ "term": { "category.l3": l3 } }));
	}
	if !selection.inventory.is_empty() {
		clauses.push(json!({ "terms": { "inventory_status": selection.inventory } }));
	}

	for (name, value) in &selection.attributes {
		clauses.push(nested_attribute(name, value));
	}

	clauses
}

/// Both terms ride in one nested scope so they must match the same entry of
/// the `attributes` array, not two unrelated entries.
fn nested_attribute(name: &str, value: &str) -> Value {
	json!({
		"nested": {
			"path": "attributes",
			"query": {
				"bool": {
					"must": [
						{ "term": { "attributes.name": name } },
						{ "term": { "attributes.value": value } }
					]
				}
			}
		}
	})
}
