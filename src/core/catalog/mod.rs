//! Model catalogs: fetch, normalize, and look up records from both providers.

mod error;
mod http;
mod lenient;
pub mod lookup;
pub mod nanogpt;
pub mod openrouter;
pub mod probe;
pub mod record;

pub use error::ClientError;
pub use nanogpt::NanoGptClient;
pub use openrouter::OpenRouterClient;
pub use probe::probe_tiers;
pub use record::{CatalogResponse, ModelRecord, Tier};
