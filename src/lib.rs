pub mod ast;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod lexer;
pub mod methods;
pub mod model;
pub mod mutation;
pub mod parser;
pub mod resolver;
pub mod scope;
pub mod value;

pub use ast::{Key, Path, Segment, Token};
pub use cache::{CacheStats, CompiledPath, PathCache};
pub use lexer::{Lexer, Position};
pub use methods::{Method, MethodError, MethodRegistry};
pub use model::Model;
pub use mutation::{Outcome, StructuralError};
pub use parser::{ParseError, Parser, parse};
pub use resolver::{Resolution, resolve};
pub use scope::{Bindings, Scope};
pub use value::Value;
