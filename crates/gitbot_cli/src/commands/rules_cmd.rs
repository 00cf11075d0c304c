//! `gitbot rules <file>`: loads a rules file and prints what was understood.

use std::path::Path;

use colored::Colorize;
use gitbot_core::RuleSet;
use tracing::instrument;

use crate::errors::Error;

#[cfg(test)]
#[path = "rules_cmd_tests.rs"]
mod tests;

/// Execute the rules command
#[instrument]
pub async fn execute(file: &Path) -> Result<(), Error> {
    let rules = RuleSet::load_file(file).await?;
    print!("{}", format_rules(file, &rules));
    Ok(())
}

/// Renders every parsed rule followed by a summary line.
pub fn format_rules(file: &Path, rules: &RuleSet) -> String {
    let mut output = format!("{}\n\n", file.display().to_string().bold());

    for rule in rules {
        output.push_str(&format!("{}\n", rule));
    }

    if !rules.is_empty() {
        output.push('\n');
    }

    output.push_str(&format!(
        "{} rules loaded",
        rules.len().to_string().green()
    ));
    if rules.skipped() > 0 {
        output.push_str(&format!(
            ", {} lines skipped",
            rules.skipped().to_string().yellow()
        ));
    }
    output.push('\n');

    output
}
