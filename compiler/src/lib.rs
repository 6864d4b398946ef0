//! wlgen-compiler
//!
//! This crate implements:
//!  1) A markup reader turning protocol XML into an element tree with source positions,
//!  2) The schema parser building a `wlgen_schema::Protocol` (opcodes, `new_id` expansion),
//!  3) An opt-in verifier (duplicate interfaces, identifiers, dangling enum references),
//!  4) Code generation (`compile_protocol_to_cxx` → `String`) in two passes,
//!  5) Error types (`WlgenError`), emitter options, and the source/sink traits.

pub mod error;
pub mod utils;
pub mod xml;
pub mod parser;
pub mod verifier;
pub mod description;
pub mod type_map;
pub mod options;
pub mod compiler;
pub mod gen_cxx;
pub mod traits;

pub use compiler::check_protocol;
pub use compiler::compile_batch;
pub use compiler::compile_protocol;
pub use compiler::compile_protocol_bytes;
pub use compiler::compile_to_header;
pub use gen_cxx::compile_protocol_to_cxx;
pub use options::EmitOptions;
