pub mod batch;
pub mod config;
pub mod cover;
pub mod error;
pub mod forbidden;
pub mod pairs;
pub mod verify;

pub use batch::{generate_batch, Batch};
pub use config::GeneratorConfig;
pub use cover::{cover_pairs, CoverOutcome};
pub use error::GeneratorError;
pub use forbidden::forbidden_mains;
pub use verify::{verify_batch, VerificationReport};
