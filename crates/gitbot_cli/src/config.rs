//! Labelling options shared by the `console` and `web` commands, plus the
//! options only polling understands.
//!
//! Each toggle comes as a `--flag`/`--no-flag` pair. When both are given the
//! last one wins.

use clap::Args;
use gitbot_core::{ResolutionOptions, SyncOptions};

/// Environment variable holding a log filter. Overrides `-v`.
pub const LOG_ENV: &str = "GITBOT_LOG";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone, Default)]
pub struct LabellingArgs {
    /// Label to apply to an issue if no other rule applies. If empty, no label is applied
    #[arg(short, long = "default-label", default_value = "")]
    pub default_label: String,

    /// Match the title of the issue against the rules as well (default)
    #[arg(long = "process-title", overrides_with = "no_process_title")]
    process_title: bool,
    #[arg(long = "no-process-title", overrides_with = "process_title")]
    no_process_title: bool,

    /// Match comments against the rules as well (default)
    #[arg(long = "comments", overrides_with = "no_comments")]
    comments: bool,
    #[arg(long = "no-comments", overrides_with = "comments")]
    no_comments: bool,

    /// Remove the current labels of an issue when a rule matches
    #[arg(long = "remove-current", overrides_with = "no_remove_current")]
    remove_current: bool,
    #[arg(long = "no-remove-current", overrides_with = "remove_current")]
    no_remove_current: bool,

    /// Log the labels that would be applied without changing any issue
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write labels even when they equal the current ones
    #[arg(long = "always-update")]
    pub always_update: bool,
}

impl LabellingArgs {
    /// Options for a single issue. Polling-only fields keep their defaults.
    pub fn sync_options(&self) -> SyncOptions {
        let defaults = SyncOptions::default();
        let resolution = ResolutionOptions {
            process_title: toggle(
                self.process_title,
                self.no_process_title,
                defaults.resolution.process_title,
            ),
            process_comments: toggle(
                self.comments,
                self.no_comments,
                defaults.resolution.process_comments,
            ),
            default_label: Some(self.default_label.trim())
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        };

        SyncOptions {
            resolution,
            remove_current: toggle(
                self.remove_current,
                self.no_remove_current,
                defaults.remove_current,
            ),
            dry_run: self.dry_run,
            always_update: self.always_update,
            ..defaults
        }
    }
}

/// Issue selection for polling. Webhook deliveries name their issue, so the
/// `web` command does not take these.
#[derive(Args, Debug, Clone, Default)]
pub struct PollingArgs {
    /// Process closed issues too
    #[arg(long = "closed-issues", overrides_with = "no_closed_issues")]
    closed_issues: bool,
    #[arg(long = "no-closed-issues", overrides_with = "closed_issues")]
    no_closed_issues: bool,

    /// Skip issues that already carry labels (default)
    #[arg(long = "skip-labelled", overrides_with = "no_skip_labelled")]
    skip_labelled: bool,
    #[arg(long = "no-skip-labelled", overrides_with = "skip_labelled")]
    no_skip_labelled: bool,
}

impl PollingArgs {
    /// Overlays the polling toggles on `options`.
    pub fn apply(&self, options: SyncOptions) -> SyncOptions {
        SyncOptions {
            process_closed: toggle(
                self.closed_issues,
                self.no_closed_issues,
                options.process_closed,
            ),
            skip_labelled: toggle(
                self.skip_labelled,
                self.no_skip_labelled,
                options.skip_labelled,
            ),
            ..options
        }
    }
}

fn toggle(on: bool, off: bool, default: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

/// Default log filter for a `-v` count: warn, info, then debug.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Log filter directive: `GITBOT_LOG` when set, otherwise the `-v` level.
pub fn log_directive(verbose: u8) -> String {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| log_level(verbose).to_string())
}
