mod client;
mod error;

pub use client::EngineClient;
pub use error::{Error, Result};
