pub mod category;
pub mod facet;
pub mod selection;

pub use category::{CategoryNode, CategoryTree};
pub use facet::{AttributeFacets, FacetBucket};
pub use selection::{ANY_SENTINEL, CategoryPath, QueryStrategy, SearchSelection};
