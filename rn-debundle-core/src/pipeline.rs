//! Debundling pipeline
//!
//! [`Debundler`] runs extraction, decoding and rewriting over a bundle, renders
//! the resulting programs and writes them to an output directory. Nothing is
//! written until every registration has decoded.
//!
//! Parsing, rewriting and printing all recurse over the syntax tree, so a full
//! run happens on a worker thread with a large stack.

use std::fs;
use std::panic;
use std::path::{Path, PathBuf};
use std::thread;

use indexmap::IndexMap;
use rn_debundle_parser::{generate, parse_program_with_source, GenerateOptions, Program, Span};
use tracing::{debug, info, warn};

use crate::config::RegistrationPattern;
use crate::decoder::decode_module;
use crate::error::DebundleError;
use crate::extractor::{extract_modules, Extraction};
use crate::naming::{is_plain_file_name, MAIN_FILE_NAME};
use crate::rewriter::{rewrite_module, RewrittenProgram};

/// Stack size of the thread a full run happens on. Minified bundles nest
/// callbacks and parentheses far deeper than the main thread's stack allows.
pub const WORKER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Every module of a bundle plus the residual program
#[derive(Debug, Clone, PartialEq)]
pub struct DebundledBundle {
    /// Modules in registration order
    pub modules: Vec<RewrittenProgram>,
    /// The bundle with all registrations removed
    pub main: Program,
}

/// A rendered file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub file_name: String,
    pub contents: String,
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebundleSummary {
    /// Registrations decoded, duplicates included
    pub modules: usize,
    /// Registrations whose id was already taken by an earlier one
    pub duplicates: usize,
    pub output_dir: PathBuf,
    /// Files written, `main.js` last
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Debundler {
    pattern: RegistrationPattern,
    generate_options: GenerateOptions,
}

impl Debundler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: RegistrationPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_generate_options(mut self, generate_options: GenerateOptions) -> Self {
        self.generate_options = generate_options;
        self
    }

    pub fn pattern(&self) -> &RegistrationPattern {
        &self.pattern
    }

    pub fn generate_options(&self) -> &GenerateOptions {
        &self.generate_options
    }

    /// Parse bundle source and split it into modules
    pub fn debundle_source(
        &self,
        source: &str,
        source_name: Option<String>,
    ) -> Result<DebundledBundle, DebundleError> {
        let program = parse_program_with_source(source, source_name)?;
        self.debundle_program(program)
    }

    /// Split an already parsed bundle into modules
    pub fn debundle_program(&self, program: Program) -> Result<DebundledBundle, DebundleError> {
        let Extraction { calls, residual } = extract_modules(program, &self.pattern);

        let mut modules = Vec::with_capacity(calls.len());
        for call in calls {
            let module = decode_module(call, &self.pattern)?;
            debug!(
                id = %module.id,
                parameters = module.implementation.parameters.len(),
                dependencies = module.dependencies.len(),
                "decoded module"
            );
            modules.push(rewrite_module(module));
        }

        Ok(DebundledBundle {
            modules,
            main: residual,
        })
    }

    /// Print every module and `main.js`.
    ///
    /// Modules sharing an id share a file; the later registration wins and each
    /// collision is logged. Returns the files in first-registration order with
    /// `main.js` last, and the number of collisions.
    pub fn render(&self, bundle: &DebundledBundle) -> Result<(Vec<OutputFile>, usize), DebundleError> {
        let mut rendered: IndexMap<&str, (&Span, String)> = IndexMap::new();
        let mut duplicates = 0;

        for module in &bundle.modules {
            if !is_plain_file_name(&module.file_name) {
                return Err(DebundleError::UnsafeFileName {
                    file_name: module.file_name.clone(),
                });
            }

            let contents = generate(&module.program, &self.generate_options);
            if let Some((previous, _)) =
                rendered.insert(module.file_name.as_str(), (&module.span, contents))
            {
                duplicates += 1;
                warn!(
                    id = %module.id,
                    first = %format_span(previous),
                    second = %format_span(&module.span),
                    "duplicate module id, the later registration wins"
                );
            }
        }

        let mut files: Vec<OutputFile> = rendered
            .into_iter()
            .map(|(file_name, (_, contents))| OutputFile {
                file_name: file_name.to_string(),
                contents,
            })
            .collect();
        files.push(OutputFile {
            file_name: MAIN_FILE_NAME.to_string(),
            contents: generate(&bundle.main, &self.generate_options),
        });

        Ok((files, duplicates))
    }

    /// Write rendered files, creating the directory and its parents.
    /// Existing files are overwritten.
    pub fn write_outputs(&self, files: &[OutputFile], output_dir: &Path) -> Result<(), DebundleError> {
        fs::create_dir_all(output_dir).map_err(|source| DebundleError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        for file in files {
            let path = output_dir.join(&file.file_name);
            fs::write(&path, &file.contents)
                .map_err(|source| DebundleError::Write { path: path.clone(), source })?;
            debug!(path = %path.display(), bytes = file.contents.len(), "wrote file");
        }

        Ok(())
    }

    /// Read a bundle, split it and write the modules into `output_dir`
    pub fn debundle_file(
        &self,
        bundle_path: &Path,
        output_dir: &Path,
    ) -> Result<DebundleSummary, DebundleError> {
        let source = read_bundle(bundle_path)?;
        self.debundle_into(&source, Some(bundle_path.display().to_string()), output_dir)
    }

    /// Split bundle source that is already in memory and write the modules
    /// into `output_dir`. Runs on a thread with [`WORKER_STACK_SIZE`] bytes of
    /// stack; the syntax tree is built and dropped there.
    pub fn debundle_into(
        &self,
        source: &str,
        source_name: Option<String>,
        output_dir: &Path,
    ) -> Result<DebundleSummary, DebundleError> {
        on_large_stack(|| {
            info!(
                bundle = source_name.as_deref().unwrap_or("<input>"),
                bytes = source.len(),
                "debundling"
            );

            let bundle = self.debundle_source(source, source_name.clone())?;
            let modules = bundle.modules.len();
            let (files, duplicates) = self.render(&bundle)?;
            drop(bundle);
            self.write_outputs(&files, output_dir)?;

            info!(
                modules,
                duplicates,
                output_dir = %output_dir.display(),
                "debundled"
            );

            Ok(DebundleSummary {
                modules,
                duplicates,
                output_dir: output_dir.to_path_buf(),
                files: files.into_iter().map(|file| file.file_name).collect(),
            })
        })
    }
}

/// Read a bundle into memory
pub fn read_bundle(bundle_path: &Path) -> Result<String, DebundleError> {
    fs::read_to_string(bundle_path).map_err(|source| DebundleError::Read {
        path: bundle_path.to_path_buf(),
        source,
    })
}

/// Run `work` on a scoped thread with [`WORKER_STACK_SIZE`] bytes of stack.
/// A panic on the worker is resumed on the caller.
fn on_large_stack<T, F>(work: F) -> Result<T, DebundleError>
where
    T: Send,
    F: FnOnce() -> Result<T, DebundleError> + Send,
{
    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("rn-debundle-worker".to_string())
            .stack_size(WORKER_STACK_SIZE)
            .spawn_scoped(scope, work)
            .map_err(DebundleError::Worker)?;

        match worker.join() {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

fn format_span(span: &Span) -> String {
    match span.start_line_col {
        Some((line, column)) => format!("{}:{}", line, column),
        None => format!("{}..{}", span.start, span.end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_residual_becomes_main() {
        let bundle = Debundler::new()
            .debundle_source("var x = 1;\n__d(function () { a(); }, 0, []);", None)
            .unwrap();

        let (files, duplicates) = Debundler::new().render(&bundle).unwrap();
        assert_eq!(duplicates, 0);
        assert_eq!(
            files,
            vec![
                OutputFile {
                    file_name: "mod_0.js".to_string(),
                    contents: "a();".to_string(),
                },
                OutputFile {
                    file_name: "main.js".to_string(),
                    contents: "var x = 1;".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_ids_keep_later_module() {
        let bundle = Debundler::new()
            .debundle_source(
                "__d(function () { first(); }, 5, []);\n__d(function () { second(); }, '5', []);",
                None,
            )
            .unwrap();
        assert_eq!(bundle.modules.len(), 2);

        let (files, duplicates) = Debundler::new().render(&bundle).unwrap();
        assert_eq!(duplicates, 1);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name, "mod_5.js");
        assert_eq!(files[0].contents, "second();");
    }

    #[test]
    fn test_shape_error_stops_the_run() {
        let error = Debundler::new()
            .debundle_source("__d(function () {}, 0, []);\n__d(function () {}, id, []);", None)
            .unwrap_err();
        assert!(matches!(
            error,
            DebundleError::Shape(ShapeError::ExpectedLiteralId { .. })
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let error = Debundler::new().debundle_source("__d(function () {", None).unwrap_err();
        assert!(matches!(error, DebundleError::Parse(_)));
    }

    #[test]
    fn test_unsafe_module_id_is_refused() {
        let bundle = Debundler::new()
            .debundle_source("__d(function () {}, '../../escape', []);", None)
            .unwrap();
        let error = Debundler::new().render(&bundle).unwrap_err();
        assert!(matches!(error, DebundleError::UnsafeFileName { .. }));
    }

    #[test]
    fn test_worker_result_is_returned() {
        let value = on_large_stack(|| Ok(21 * 2)).unwrap();
        assert_eq!(value, 42);

        let error = on_large_stack::<(), _>(|| {
            Err(DebundleError::UnsafeFileName {
                file_name: "a/b".to_string(),
            })
        })
        .unwrap_err();
        assert!(matches!(error, DebundleError::UnsafeFileName { .. }));
    }

    #[test]
    #[should_panic(expected = "worker failed")]
    fn test_worker_panic_reaches_caller() {
        let _ = on_large_stack::<(), _>(|| panic!("worker failed"));
    }

    #[test]
    fn test_custom_indent() {
        let debundler =
            Debundler::new().with_generate_options(GenerateOptions::new().with_indent("    "));
        let bundle = debundler
            .debundle_source("__d(function () { if (a) { b(); } }, 0, []);", None)
            .unwrap();
        let (files, _) = debundler.render(&bundle).unwrap();
        assert_eq!(files[0].contents, "if (a) {\n    b();\n}");
    }
}
