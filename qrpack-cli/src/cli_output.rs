// ABOUTME: User-facing status and error messages on stderr for qrpack
// ABOUTME: Colors only when stderr is a terminal and color was not disabled

use owo_colors::OwoColorize;
use qrpack_sdk::PackError;
use std::io::IsTerminal;

use crate::constants::{env, exit_codes};

pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Color when stderr is a TTY, `--no-color` is absent, and `NO_COLOR`
    /// and `TERM=dumb` are not set.
    pub fn new(no_color: bool) -> Self {
        let use_color = !no_color
            && std::io::stderr().is_terminal()
            && std::env::var_os(env::NO_COLOR).is_none()
            && std::env::var("TERM").unwrap_or_default() != "dumb";
        Self { use_color }
    }

    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.format_error(message));
    }

    pub fn warning(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        } else {
            eprintln!("warning: {}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "✔".green().bold(), message);
        } else {
            eprintln!("{}", message);
        }
    }

    pub fn hint(&self, message: &str) {
        if self.use_color {
            eprintln!("  {}", message.dimmed());
        } else {
            eprintln!("  {}", message);
        }
    }

    fn format_error(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "error:".red().bold(), message)
        } else {
            format!("error: {}", message)
        }
    }

    /// Print `err` with its context chain and any hint, and return the exit
    /// code for it.
    pub fn report(&self, err: &anyhow::Error) -> i32 {
        self.error(&format!("{:#}", err));

        match pack_error(err) {
            Some(pack) => {
                if let Some(help) = pack.help_text() {
                    self.hint(help);
                }
                pack.exit_code()
            }
            None => exit_codes::FAILURE,
        }
    }
}

/// The first SDK error in `err`'s chain, if any.
pub fn pack_error(err: &anyhow::Error) -> Option<&PackError> {
    err.chain().find_map(|cause| cause.downcast_ref::<PackError>())
}

pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    pack_error(err)
        .map(PackError::exit_code)
        .unwrap_or(exit_codes::FAILURE)
}
