use clap::Args;
use is_terminal::IsTerminal;

use crate::output::OutputFormat;

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (`--format` / `-f`); defaults to JSON when stdout is piped
    #[arg(short = 'f', long = "format", value_enum, env = "TELMA_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl FormatArg {
    /// Returns the effective output format. If output is piped and no format
    /// is specified, defaults to JSON.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        self.resolve_for(std::io::stdout().is_terminal())
    }

    fn resolve_for(&self, stdout_is_terminal: bool) -> OutputFormat {
        match self.format {
            Some(format) => format,
            None if stdout_is_terminal => OutputFormat::Text,
            None => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_explicit_flag() {
        let args = FormatArg {
            format: Some(OutputFormat::Jsonl),
        };
        assert_eq!(args.resolve_for(true), OutputFormat::Jsonl);
        assert_eq!(args.resolve_for(false), OutputFormat::Jsonl);
    }

    #[test]
    fn resolve_defaults_by_terminal() {
        let args = FormatArg { format: None };
        assert_eq!(args.resolve_for(true), OutputFormat::Text);
        assert_eq!(args.resolve_for(false), OutputFormat::Json);
    }
}
