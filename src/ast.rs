//! # Path expressions - syntax tree
//!
//! A path addresses one location inside a document made of mappings and
//! lists. Parsing turns the text into a [`Path`]: an ordered list of
//! [`Segment`]s that the resolver walks one step at a time.
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[segment]** - Segments, literal keys and the `Path` container
//!
//! ## Syntax
//!
//! ```text
//! todos                 // field of the root
//! todos[0].title        // list index, then field
//! todos["a b"]          // quoted key
//! todos[$i].done        // variable bound by the caller
//! $row.name             // variable as the first step
//! todos[state.current]  // nested path, resolved from the root
//! ```
//!
//! A bare identifier inside brackets is always a nested path: `a[x]` looks
//! up `x` at the root and uses its value as the key into `a`.
pub mod segment;
pub mod tokens;

pub use segment::{Key, Path, Segment};
pub use tokens::Token;
