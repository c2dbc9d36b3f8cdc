pub mod api;
pub mod asm;
pub mod ast;
pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod lower;
pub mod syntax;
pub mod vm;

// Short `jackc::X` paths used by the CLI and tests
pub use config::project;
pub use syntax::lexeme;
pub use syntax::span;

// Public API at the crate root: `jackc::compile_jack()` etc.
pub use api::*;
