mod error;

use access_transformer::at::{AccessTransformer, RuleSet};
use access_transformer::jvm::Name;
use clap::{crate_version, value_parser, Arg, ArgAction, Command};
use error::CliError;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use walkdir::WalkDir;

fn main() -> Result<(), CliError> {
    env_logger::init();

    let matches = Command::new("Access transformer")
        .version(crate_version!())
        .about("Change the visibility of classes, fields, and methods in JVM class files")
        .arg(
            Arg::new("rules")
                .short('r')
                .long("rules")
                .value_name("FILE")
                .required(true)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Access transformer rule file (may be repeated, later files win)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIRECTORY")
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("Write classes here instead of rewriting them in place"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Report what would change without writing anything"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Class file or directory of class files")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .get_matches();

    let rule_files: Vec<&PathBuf> = matches
        .get_many::<PathBuf>("rules")
        .into_iter()
        .flatten()
        .collect();
    let output_path: Option<&PathBuf> = matches.get_one::<PathBuf>("output");
    let dry_run = matches.get_flag("dry-run");
    let input_path: &Path = match matches.get_one::<PathBuf>("INPUT") {
        Some(input_path) => input_path,
        None => return Ok(()),
    };

    let rules = RuleSet::load_paths(&rule_files)?;
    log::info!(
        "Loaded {} directives for {} classes from {} files",
        rules.len(),
        rules.owners().count(),
        rule_files.len()
    );
    let transformer = AccessTransformer::new(&rules);

    // Find all of the classes, along with where they get written
    let classes: Vec<(PathBuf, PathBuf)> = if input_path.is_file() {
        let output = match (output_path, input_path.file_name()) {
            (Some(output_path), Some(file_name)) => output_path.join(file_name),
            _ => input_path.to_owned(),
        };
        vec![(input_path.to_owned(), output)]
    } else {
        let mut classes = vec![];
        for entry in WalkDir::new(input_path).follow_links(true).sort_by_file_name() {
            let path = entry?.into_path();
            if !(path.is_file() && path.extension().map_or(false, |ex| ex == "class")) {
                continue;
            }
            let output = match output_path {
                Some(output_path) => {
                    let relative = path.strip_prefix(input_path).unwrap_or(&path);
                    output_path.join(relative)
                }
                None => path.clone(),
            };
            classes.push((path, output));
        }
        classes
    };

    // Go through them, one at a time
    let mut seen_owners: HashSet<String> = HashSet::new();
    let mut count_changed = 0;
    let stdout = StandardStream::stdout(ColorChoice::Auto);
    for (class, output) in &classes {
        let class_bytes = fs::read(class)?;
        let (transformed, outcome) = transformer
            .transform_with_outcome(&class_bytes)
            .map_err(|error| CliError::Class {
                path: class.clone(),
                error,
            })?;

        let unchanged = outcome.is_unchanged();
        let (color, summary) = if unchanged {
            (Color::White, "unchanged".to_owned())
        } else {
            count_changed += 1;
            (Color::Green, format!("{} changed", outcome.changed))
        };

        // Nested classes also count as found when their `InnerClasses` entry was matched
        seen_owners.insert(outcome.owner);
        seen_owners.extend(outcome.nested);

        // Unchanged classes only need writing when they go somewhere new
        if dry_run {
            log::info!("Not writing '{}' (dry run)", output.display());
        } else if !unchanged || output != class {
            log::info!("Writing '{}'", output.display());
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(output, &transformed)?;
        }

        let mut s = stdout.lock();
        s.write_all(b" - ")?;
        s.set_color(ColorSpec::new().set_bold(true))?;
        s.write_all(class.to_string_lossy().as_bytes())?;
        s.set_color(ColorSpec::new().set_dimmed(true))?;
        s.write_all(b" [")?;
        s.set_color(ColorSpec::new().set_fg(Some(color)))?;
        s.write_all(summary.as_bytes())?;
        s.set_color(ColorSpec::new().set_dimmed(true))?;
        s.write_all(b"]\n")?;
        s.reset()?;
    }

    // Directives for classes that never showed up are usually stale, but not fatal
    let mut unused_owners: Vec<&str> = rules
        .owners()
        .map(|owner| owner.as_str())
        .filter(|owner| !seen_owners.contains(*owner))
        .collect();
    unused_owners.sort_unstable();
    for owner in unused_owners {
        log::warn!("No class found for directives on '{}'", owner);
    }

    log::info!("Changed {} of {} classes", count_changed, classes.len());
    Ok(())
}
