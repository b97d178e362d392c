use crate::at::{parse_directive, Error, RuleSet};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Start of a comment running to the end of the line
const COMMENT: char = '#';

/// Strip the comment and surrounding whitespace from a raw rule file line
///
/// Returns `None` for lines with nothing left.
fn clean_line(raw: &str) -> Option<&str> {
    let line = match raw.find(COMMENT) {
        Some(comment) => &raw[..comment],
        None => raw,
    };
    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

impl RuleSet {
    /// Read rules from raw text, one per line
    ///
    /// `source_name` is only used to say where errors are.
    pub fn load_reader<R: BufRead>(reader: R, source_name: &str) -> Result<RuleSet, Error> {
        let mut rules = RuleSet::new();
        for (index, raw) in reader.lines().enumerate() {
            let raw = raw?;
            let line = match clean_line(&raw) {
                Some(line) => line,
                None => continue,
            };
            let directive = parse_directive(line).map_err(|error| Error::AtLine {
                source_name: source_name.to_owned(),
                line_number: index + 1,
                error: Box::new(error),
            })?;
            rules.push(directive);
        }
        Ok(rules)
    }

    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<RuleSet, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let rules = RuleSet::load_reader(BufReader::new(file), &path.display().to_string())?;
        debug!("Loaded {} directives from {}", rules.len(), path.display());
        Ok(rules)
    }

    /// Load several rule files into one rule set
    ///
    /// Later files override earlier ones when directives are equally specific.
    pub fn load_paths<I, P>(paths: I) -> Result<RuleSet, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut rules = RuleSet::new();
        for path in paths {
            rules.merge(RuleSet::load_path(path)?);
        }
        Ok(rules)
    }
}
