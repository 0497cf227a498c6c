mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Engine, Search};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.engine.endpoint.trim().is_empty() {
		return Err(Error::Validation { message: "engine.endpoint must be non-empty.".to_string() });
	}
	if cfg.engine.index.trim().is_empty() {
		return Err(Error::Validation { message: "engine.index must be non-empty.".to_string() });
	}
	if cfg.engine.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "engine.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.result_size == 0 {
		return Err(Error::Validation {
			message: "search.result_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.rank_window_size < cfg.search.result_size {
		return Err(Error::Validation {
			message: "search.rank_window_size must be at least search.result_size.".to_string(),
		});
	}

	for (label, boost) in
		[("title_boost", cfg.search.title_boost), ("semantic_boost", cfg.search.semantic_boost)]
	{
		if !boost.is_finite() {
			return Err(Error::Validation {
				message: format!("search.{label} must be a finite number."),
			});
		}
		if boost <= 0.0 {
			return Err(Error::Validation {
				message: format!("search.{label} must be greater than zero."),
			});
		}
	}

	if cfg.search.attribute_agg_size == 0 {
		return Err(Error::Validation {
			message: "search.attribute_agg_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.inventory_agg_size == 0 {
		return Err(Error::Validation {
			message: "search.inventory_agg_size must be greater than zero.".to_string(),
		});
	}

	for (label, sizes) in [
		("facet_level_sizes", &cfg.search.facet_level_sizes),
		("hierarchy_level_sizes", &cfg.search.hierarchy_level_sizes),
	] {
		if sizes.iter().any(|size| *size == 0) {
			return Err(Error::Validation {
				message: format!("search.{label} entries must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.engine.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.engine.api_key = None;
	}

	while cfg.engine.endpoint.ends_with('/') {
		cfg.engine.endpoint.pop();
	}
}
