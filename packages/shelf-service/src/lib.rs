pub mod hierarchy;
pub mod search;

mod error;

pub use error::{Error, Result};
pub use search::{MISSING_FIELD, ProductView, SearchResult};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use shelf_config::Config;
use shelf_engine::EngineClient;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The engine seam. One call per search; implementations own transport,
/// pooling, and credentials.
pub trait SearchEngine
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, shelf_engine::Result<Value>>;
}

pub struct HttpSearchEngine {
	client: EngineClient,
}
impl HttpSearchEngine {
	pub fn new(client: EngineClient) -> Self {
		Self { client }
	}
}
impl SearchEngine for HttpSearchEngine {
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, shelf_engine::Result<Value>> {
		Box::pin(self.client.search(index, body))
	}
}

pub struct ShelfService {
	pub cfg: Config,
	pub engine: Arc<dyn SearchEngine>,
}
impl ShelfService {
	pub fn new(cfg: Config, engine: Arc<dyn SearchEngine>) -> Self {
		Self { cfg, engine }
	}

	/// Builds the default HTTP engine from the configuration.
	pub fn connect(cfg: Config) -> Result<Self> {
		let client = EngineClient::new(&cfg.engine)
			.map_err(|err| Error::EngineUnavailable { message: err.to_string() })?;

		Ok(Self::new(cfg, Arc::new(HttpSearchEngine::new(client))))
	}
}
