//! Domain layer - schemas, codecs, outcomes, and the concrete record types.
//!
//! Nothing here performs I/O. Ports describe the I/O the domain needs;
//! adapters provide it.

pub mod brands;
pub mod codec;
pub mod errors;
pub mod hacker_news;
pub mod outcome;
pub mod report;
pub mod sample;
pub mod schema;
pub mod transition;

pub use brands::Url;
pub use codec::{Codec, DecodeError, EncodeError, ParseFailure, TextFormat};
pub use errors::{StorageError, TransportError};
pub use outcome::{PipelineFailure, PipelineOutcome, ReadFailure, ReadOutcome, WriteFailure};
pub use schema::{Schema, Shape, ValidationFailure, ValidationFailures};
pub use transition::ValidatedTransition;
