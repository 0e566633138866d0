// src/cli/mod.rs

use clap::Parser;

/// Chooses the tool and runs it.
pub mod dispatcher;

/// Renders the help template, replacing the semantic tags (`<title>`,
/// `<cmd>`, ...) with ANSI styles when the terminal supports color.
pub fn help_text() -> String {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset)
}

/// The `-gv` line.
pub fn version_text() -> String {
    format!(t!("cli.version"), version = env!("CARGO_PKG_VERSION"))
}

/// gm: runs Gradle, Maven, Ant, Bach or jbang, whichever the project uses.
///
/// Clap only captures the raw token list. Its own `--help`/`--version`
/// handling is off so that every token (including `-h`, `-v` and `--help`)
/// reaches the build tool; `gm` answers to `-gh` and `-gv` instead.
#[derive(Parser, Debug)]
#[command(
    name = "gm",
    version,
    about,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Dispatcher flags, then tool flags, then goals/tasks and their arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_passes_everything_through() {
        let cli = Cli::parse_from(["gm", "-gq", "--help", "-v", "clean", "build"]);
        assert_eq!(cli.args, vec!["-gq", "--help", "-v", "clean", "build"]);
    }

    #[test]
    fn test_help_lists_dispatcher_flags() {
        let help = help_text();
        for code in ["-gg", "-gm", "-gj", "-gb", "-ga", "-gq", "-gd", "-gn", "-gr", "-gc", "-gh", "-gv"] {
            assert!(help.contains(code), "help text is missing {}", code);
        }
        assert!(!help.contains("<cmd>"));
    }

    #[test]
    fn test_version_text() {
        assert!(version_text().contains(env!("CARGO_PKG_VERSION")));
    }
}
