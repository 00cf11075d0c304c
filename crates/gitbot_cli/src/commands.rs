//! Command modules for the gitbot CLI.
//!
//! - `console_cmd`: polls repositories and labels their issues
//! - `web_cmd`: runs the webhook server
//! - `generate_cmd`: writes sample configuration files
//! - `rules_cmd`: checks a rules file

pub mod console_cmd;
pub mod generate_cmd;
pub mod rules_cmd;
pub mod web_cmd;
