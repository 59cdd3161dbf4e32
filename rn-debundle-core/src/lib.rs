//! Debundling for React Native / Metro bundles
//!
//! A Metro bundle registers every module through a call such as
//! `__d(function (global, require, ..., dependencyMap) { ... }, 42, [7, 9])`.
//! This crate reverses that step:
//!
//! - **Extractor**: detaches every registration statement from the parsed bundle,
//!   leaving the residual program behind
//! - **Decoder**: checks the shape of each call and decodes it into a [`Module`]
//! - **Rewriter**: turns a module into a standalone ES module whose dependencies
//!   are default imports of `./mod_<id>`
//! - **Pipeline**: [`Debundler`] runs the stages and writes `mod_<id>.js` files
//!   plus `main.js`

pub mod config;
pub mod decoder;
pub mod error;
pub mod extractor;
pub mod module;
pub mod naming;
pub mod pipeline;
pub mod rewriter;
pub mod visitor;

pub use config::{ArgumentPositions, RegistrationPattern};
pub use decoder::decode_module;
pub use error::{DebundleError, ShapeError};
pub use extractor::{extract_modules, Extraction};
pub use module::{Module, ModuleId, ModuleImplementation, RegistrationCall};
pub use naming::{module_file_name, module_name, MAIN_FILE_NAME};
pub use pipeline::{
    read_bundle, DebundleSummary, DebundledBundle, Debundler, OutputFile, WORKER_STACK_SIZE,
};
pub use rewriter::{rewrite_module, RewrittenProgram};
pub use visitor::{Visitor, VisitorMut};
