use clap::Parser;
use miette::{MietteHandlerOpts, NamedSource, Report};
use rn_debundle_core::{read_bundle, DebundleError, DebundleSummary, Debundler};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "warn,rn_debundle=info,rn_debundle_core=info";

#[derive(Parser, Debug)]
#[command(
    name = "rn-debundle",
    version,
    about = "Split a compiled React Native bundle back into modules",
    long_about = "Reads a Metro bundle, writes every `__d(...)` module registration to \
                  <output-dir>/mod_<id>.js as an ES module and everything else to \
                  <output-dir>/main.js."
)]
struct Cli {
    /// Path to compiled React Native bundle to debundle
    #[arg(value_name = "BUNDLE")]
    bundle: PathBuf,

    /// Path to write decompiled bundle data into
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,
}

fn main() {
    setup_miette_handler();
    init_logging();

    let cli = Cli::parse();

    if let Err(report) = run(&cli) {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<DebundleSummary, Report> {
    debug!(bundle = %cli.bundle.display(), output_dir = %cli.output_dir.display(), "starting");

    let source = read_bundle(&cli.bundle)?;

    Debundler::new()
        .debundle_into(&source, Some(cli.bundle.display().to_string()), &cli.output_dir)
        .map_err(|error| report_with_source(error, &cli.bundle, source))
}

/// Attach the bundle text so labels on parse and shape errors render in context
fn report_with_source(error: DebundleError, bundle: &Path, source: String) -> Report {
    let points_into_bundle = matches!(error, DebundleError::Parse(_) | DebundleError::Shape(_));
    let report = Report::new(error);

    if !points_into_bundle {
        return report;
    }

    report.with_source_code(
        NamedSource::new(bundle.display().to_string(), source).with_language("JavaScript"),
    )
}

/// Configure miette for error reporting with JavaScript syntax highlighting
fn setup_miette_handler() {
    use miette::highlighters::SyntectHighlighter;
    use syntect::highlighting::ThemeSet;
    use syntect::parsing::SyntaxSet;

    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let Some(theme) = theme_set.themes.get("base16-ocean.dark") else {
        return;
    };
    let highlighter = SyntectHighlighter::new(syntax_set, theme.clone(), true);

    miette::set_hook(Box::new(move |_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .with_syntax_highlighting(highlighter.clone())
                .build(),
        )
    }))
    .ok();
}

/// Send `tracing` output to stderr, filtered by `RUST_LOG`
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_positional_arguments() {
        let cli = Cli::try_parse_from(["rn-debundle", "index.bundle", "out"]).unwrap();
        assert_eq!(cli.bundle, PathBuf::from("index.bundle"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_both_arguments_are_required() {
        assert!(Cli::try_parse_from(["rn-debundle", "index.bundle"]).is_err());
        assert!(Cli::try_parse_from(["rn-debundle"]).is_err());
    }

    #[test]
    fn test_run_writes_modules() {
        let workspace = tempfile::tempdir().unwrap();
        let bundle = workspace.path().join("index.bundle");
        let output_dir = workspace.path().join("out");
        fs::write(&bundle, "__d(function (a) { a(); }, 1, [2]);\nstart();").unwrap();

        let summary = run(&Cli {
            bundle,
            output_dir: output_dir.clone(),
        })
        .unwrap();

        assert_eq!(summary.files, vec!["mod_1.js", "main.js"]);
        assert_eq!(
            fs::read_to_string(output_dir.join("mod_1.js")).unwrap(),
            "import a from './mod_2';\na();"
        );
    }

    #[test]
    fn test_shape_error_report_carries_source() {
        let workspace = tempfile::tempdir().unwrap();
        let bundle = workspace.path().join("index.bundle");
        fs::write(&bundle, "__d(function () {}, id, []);").unwrap();

        let report = run(&Cli {
            bundle,
            output_dir: workspace.path().join("out"),
        })
        .unwrap_err();

        assert_eq!(report.to_string(), "expected literal module id");
        assert!(report.source_code().is_some());
    }

    #[test]
    fn test_report_uses_source_already_read() {
        let source = "__d(function () {}, id, []);".to_string();
        let error = Debundler::new()
            .debundle_source(&source, None)
            .unwrap_err();

        let report = report_with_source(error, Path::new("gone.bundle"), source.clone());
        let attached = report
            .source_code()
            .unwrap()
            .read_span(&(0, source.len()).into(), 0, 0)
            .unwrap();
        assert_eq!(attached.data(), source.as_bytes());
    }

    #[test]
    fn test_missing_bundle_report_has_no_source() {
        let workspace = tempfile::tempdir().unwrap();
        let report = run(&Cli {
            bundle: workspace.path().join("missing.bundle"),
            output_dir: workspace.path().join("out"),
        })
        .unwrap_err();

        assert!(report.to_string().starts_with("Failed to read bundle"));
        assert!(report.source_code().is_none());
        assert!(!workspace.path().join("out").exists());
    }
}
