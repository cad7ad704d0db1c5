//! Decoding of engine mesh containers.
//!
//! A container pairs a metadata document ([schema::MeshMetadata]) with a single binary buffer.
//! Vertex data is stored as interleaved records, one region ("bundle") per group of attributes;
//! index data is stored as packed unsigned integers. The functions in this crate turn both into
//! dense arrays, independent of the source stride and record layout.

mod array;
mod decode;
mod format;
pub mod schema;

pub use array::*;
pub use decode::*;
pub use format::*;
