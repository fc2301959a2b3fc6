//! An immutable, structurally shared rope for editor text buffers.
//!
//! ```
//! use text_rope::Rope;
//!
//! let rope = Rope::new("hello world");
//! let edited = rope.insert(5, "!!")?.replace(0, 5, "HELLO")?;
//!
//! assert_eq!(edited.to_string(), "HELLO!! world");
//! assert_eq!(rope.to_string(), "hello world");
//! # Ok::<(), text_rope::RopeError>(())
//! ```

mod config;
mod error;
mod rope;

pub use self::config::{RopeConfig, CHUNK_SIZE_ENV, DEFAULT_CHUNK_SIZE};
pub use self::error::RopeError;
pub use self::rope::{Chunks, NodeView, Rope};
