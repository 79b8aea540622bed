//! Core types and traits for the skein particle-track toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the particle identifier newtype, the raw value model, the [`Dataset`]
//! collaborator trait, and the error types shared by the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod dataset;
mod error;
mod id;
mod value;

pub use dataset::{Dataset, VarScope};
pub use error::{OpenError, QueryError};
pub use id::Pid;
pub use value::{ValueKind, Values};
