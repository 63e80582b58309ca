pub mod build;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod index;
pub mod logging;
pub mod record;
pub mod source;
pub mod tools;

pub use build::{BuildOptions, BuildOutcome, build_index, build_site};
pub use codec::Format;
pub use config::DocsConfig;
pub use error::{BuildError, CodecError, ConfigError};
pub use index::{SearchIndex, Validation, Warning};
pub use record::{Category, DocumentRecord};
