//! Help text generation and utilities

use crate::cli::args::Cli;
use clap::CommandFactory;

/// Generate help text for the CLI
pub fn generate_help() -> String {
    Cli::command().render_help().to_string()
}

/// Get the log filter for a verbosity count
pub fn get_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert_eq!(get_log_level(0), "info");
        assert_eq!(get_log_level(1), "debug");
        assert_eq!(get_log_level(2), "trace");
        assert_eq!(get_log_level(5), "trace");
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = generate_help();
        for name in [
            "analyze-export",
            "status",
            "multiple-active",
            "refunded-no-active",
            "filter-temporary",
            "filter-disabled",
        ] {
            assert!(help.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
