// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;
use std::path::Path;

use crate::config::{example_config, load_config, resolve_config, LintConfig};
use console::style;

use crate::error::{CommitError, ConfigError, LintError, Result, ResultExt, ValidationError};
use crate::rules::{RuleEngine, ValidationResult};

use super::args::{CheckArgs, Cli, Commands, InitArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Version => return run_version(),
        Commands::Init(args) => return run_init(args),
        _ => {}
    }

    let config = load_config(cli.config.as_deref())?;

    if cli.no_color || !config.ui.color {
        console::set_colors_enabled(false);
    }

    match &cli.command {
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::PrintConfig => run_print_config(&cli, &config),
        Commands::Version | Commands::Init(_) => Ok(()),
    }
}

/// A message to check and where it came from.
struct Input {
    source: String,
    text: String,
}

/// Collect messages from arguments, files and stdin.
fn collect_inputs(args: &CheckArgs) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();

    if args.messages.iter().filter(|m| *m == "-").count() > 1 {
        return Err(LintError::WithContext {
            context: "check".to_string(),
            message: "stdin ('-') can only be read once".to_string(),
        });
    }

    for (idx, message) in args.messages.iter().enumerate() {
        if message == "-" {
            inputs.push(read_stdin()?);
        } else {
            inputs.push(Input {
                source: format!("arg {}", idx + 1),
                text: message.clone(),
            });
        }
    }

    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;
        inputs.push(Input {
            source: path.display().to_string(),
            text,
        });
    }

    if inputs.is_empty() {
        inputs.push(read_stdin()?);
    }

    Ok(inputs)
}

fn read_stdin() -> Result<Input> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(Input {
        source: "stdin".to_string(),
        text,
    })
}

/// Run the check command.
fn run_check(cli: &Cli, config: &LintConfig, args: &CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let engine = RuleEngine::from_config(config)?;
    tracing::debug!("Loaded {} rule(s)", engine.rules().len());

    let inputs = collect_inputs(args)?;
    let (results, unusable) = check_inputs(&engine, inputs)?;

    print_results(&results, &unusable, cli.format, config.ui.hints, args.quiet);

    let errors: usize =
        results.iter().map(|r| r.errors().count()).sum::<usize>() + unusable.len();
    let warnings: usize = results.iter().map(|r| r.warnings().count()).sum();
    let failed =
        !unusable.is_empty() || results.iter().any(|r| r.exit_code(args.strict) != 0);

    if failed {
        Err(LintError::Validation(ValidationError::Failed { errors, warnings }))
    } else {
        Ok(())
    }
}

/// An input that could not be checked, e.g. an empty message.
struct Unusable {
    source: String,
    error: CommitError,
}

/// Check every input. A message that cannot be parsed is reported on its own
/// and does not stop the others.
fn check_inputs(
    engine: &RuleEngine,
    inputs: Vec<Input>,
) -> Result<(Vec<ValidationResult>, Vec<Unusable>)> {
    let mut results = Vec::with_capacity(inputs.len());
    let mut unusable = Vec::new();

    for input in inputs {
        match engine.validate_str(&input.text) {
            Ok(result) => results.push(result.with_source(input.source)),
            Err(LintError::Commit(error)) => {
                tracing::debug!("Skipping {}: {}", input.source, error);
                unusable.push(Unusable {
                    source: input.source,
                    error,
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok((results, unusable))
}

fn print_results(
    results: &[ValidationResult],
    unusable: &[Unusable],
    format: Option<OutputFormat>,
    hints: bool,
    quiet: bool,
) {
    match format {
        Some(OutputFormat::Json) => {
            let mut entries: Vec<_> = results.iter().map(ValidationResult::to_json).collect();
            entries.extend(unusable.iter().map(|u| {
                serde_json::json!({
                    "valid": false,
                    "source": u.source,
                    "error": u.error.to_string(),
                })
            }));
            let json = serde_json::json!({
                "valid": unusable.is_empty() && results.iter().all(ValidationResult::is_valid),
                "results": entries,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        _ => {
            for result in results {
                if quiet && result.findings.is_empty() {
                    continue;
                }
                println!("{}", result.format_text(hints));
            }
            for u in unusable {
                println!(
                    "{} {} {}",
                    style("✗").red().bold(),
                    style(&u.source).cyan(),
                    u.error
                );
            }
        }
    }
}

/// Run the print-config command.
fn run_print_config(cli: &Cli, config: &LintConfig) -> Result<()> {
    let resolved = resolve_config(config.clone())?;

    let output = match cli.format {
        Some(OutputFormat::Json) => serde_json::to_string_pretty(&resolved)
            .context("Failed to serialize configuration")?,
        _ => toml::to_string(&resolved).context("Failed to serialize configuration")?,
    };

    println!("{}", output);
    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cmlint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: &InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    write_example_config(&args.path, args.force)?;
    println!("✓ Created {}", args.path.display());

    Ok(())
}

fn write_example_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(LintError::Config(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        }));
    }

    std::fs::write(path, example_config()).map_err(|e| LintError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })
}
