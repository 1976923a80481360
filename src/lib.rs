//! Purpose: Composable JSON decoders and encoders with precise error paths.
//! Exports: `value`, `decode`, `encode`, `either`, `path`, `error` plus
//! curated re-exports of the everyday types.
//! Role: Pure value library; grammar-level parsing and string escaping
//! delegate to serde_json.
//! Invariants: Every operation is a pure, synchronous function over
//! immutable inputs; decoders and encoders are safe to share across threads.
//! Invariants: Decode failures are plain values carrying the JSON path where
//! decoding stopped; nothing in this crate panics on malformed input.

pub mod decode;
pub mod either;
pub mod encode;
pub mod error;
pub mod path;
pub mod value;

pub use decode::Decoder;
pub use either::Either;
pub use error::{DecodeError, DecodeErrorKind, ParseError};
pub use path::{Path, Segment};
pub use value::{StringifyMode, Value, parse, stringify};
