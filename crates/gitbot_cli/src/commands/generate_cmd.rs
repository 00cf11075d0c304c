//! `gitbot generate`: writes sample configuration files into the user
//! configuration directory.
//!
//! Existing files are left alone so a configured installation is never
//! overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use gitbot_core::{paths, rule_set::DEFAULT_RULES_FILE};
use tracing::{debug, info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "generate_cmd_tests.rs"]
mod tests;

/// Name of the sample auth file. Rename it to `auth.toml` after editing.
pub const AUTH_SAMPLE_FILE: &str = "auth.toml.sample";

pub const AUTH_SAMPLE: &str = r#"[auth]
github_token = "<your token>"
hook_secret = "<github hook secret>"
"#;

pub const RULES_SAMPLE: &str = r#"#; Separate regex and assigned label by "=>".
#; Spaces in the regex section DO MATTER! "xyz=>abc" is NOT "xyz => abc"

bug\s+[^?]*=>bug
help=>help wanted
(how|what|why).*\?=>question
"#;

/// Result of writing one sample file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedFile {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Execute the generate command
#[instrument]
pub fn execute() -> Result<(), Error> {
    let dir = paths::config_dir().ok_or_else(|| {
        Error::Config("Could not determine the user configuration directory".to_string())
    })?;

    for file in generate_into(&dir)? {
        println!("{}", format_generated(&file));
    }

    Ok(())
}

/// Writes the sample files into `dir`, creating it when needed.
///
/// # Errors
///
/// `Error::WriteFile` if the directory or a file cannot be written.
pub fn generate_into(dir: &Path) -> Result<Vec<GeneratedFile>, Error> {
    fs::create_dir_all(dir).map_err(|source| Error::WriteFile {
        path: dir.to_path_buf(),
        source,
    })?;

    Ok(vec![
        write_new(&dir.join(AUTH_SAMPLE_FILE), AUTH_SAMPLE)?,
        write_new(&dir.join(DEFAULT_RULES_FILE), RULES_SAMPLE)?,
    ])
}

fn write_new(path: &Path, content: &str) -> Result<GeneratedFile, Error> {
    if path.exists() {
        debug!(path = %path.display(), "Sample file exists, leaving it alone");
        return Ok(GeneratedFile::AlreadyExists(path.to_path_buf()));
    }

    fs::write(path, content).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "Created sample file");
    Ok(GeneratedFile::Created(path.to_path_buf()))
}

pub fn format_generated(file: &GeneratedFile) -> String {
    match file {
        GeneratedFile::Created(path) => format!(
            "{} {}. Edit it to your needs.",
            "Created file".green(),
            path.display()
        ),
        GeneratedFile::AlreadyExists(path) => format!(
            "{} {} already exists. If you want to create a new one, delete it and rerun this command.",
            "File".yellow(),
            path.display()
        ),
    }
}
