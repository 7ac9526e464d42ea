use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

/// Exit status for missing or malformed arguments.
pub(crate) const USAGE_EXIT_CODE: u8 = 1;

#[derive(Debug, Parser)]
#[command(
    name = "quickbook",
    version,
    about = "Provision the textbook vector index and smoke-test the tutoring agent"
)]
pub(crate) struct Cli {
    /// Path to the TOML config file (default: $QUICKBOOK_CONFIG or config/default.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub(crate) enum Command {
    /// Create the k-NN index in the search collection; an existing index is left as is
    CreateIndex,
    /// Print the index body that create-index sends, without any network call
    Schema,
    /// Ask an agent one question and stream the answer to stdout
    Invoke {
        agent_id: String,
        alias_id: String,
        /// Question to ask (default: the configured fallback question)
        question: Option<String>,
        /// Reuse this session instead of starting a fresh one
        #[arg(long, value_name = "ID")]
        session_id: Option<String>,
    },
}

/// Map a parse failure to the process exit status.
///
/// Help and version output are not failures; every other parse error is a usage error.
pub(crate) fn exit_code_for(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn invoke_requires_agent_and_alias() {
        let err = Cli::try_parse_from(["quickbook", "invoke", "AGENT"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(exit_code_for(&err), 1);
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn invoke_without_arguments_is_usage_error() {
        let err = Cli::try_parse_from(["quickbook", "invoke"]).unwrap_err();
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn missing_subcommand_is_usage_error() {
        let err = Cli::try_parse_from(["quickbook"]).unwrap_err();
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn help_and_version_exit_zero() {
        let err = Cli::try_parse_from(["quickbook", "--help"]).unwrap_err();
        assert_eq!(exit_code_for(&err), 0);
        let err = Cli::try_parse_from(["quickbook", "--version"]).unwrap_err();
        assert_eq!(exit_code_for(&err), 0);
    }

    #[test]
    fn invoke_question_is_optional() {
        let cli = Cli::try_parse_from(["quickbook", "invoke", "AGENT", "ALIAS"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Invoke {
                agent_id: "AGENT".into(),
                alias_id: "ALIAS".into(),
                question: None,
                session_id: None,
            }
        );
    }

    #[test]
    fn invoke_with_question_and_session() {
        let cli = Cli::try_parse_from([
            "quickbook",
            "invoke",
            "AGENT",
            "ALIAS",
            "What is an integral?",
            "--session-id",
            "test-session-123",
            "--config",
            "ops.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ops.toml")));
        assert_eq!(
            cli.command,
            Command::Invoke {
                agent_id: "AGENT".into(),
                alias_id: "ALIAS".into(),
                question: Some("What is an integral?".into()),
                session_id: Some("test-session-123".into()),
            }
        );
    }

    #[test]
    fn create_index_takes_no_arguments() {
        let cli = Cli::try_parse_from(["quickbook", "create-index"]).unwrap();
        assert_eq!(cli.command, Command::CreateIndex);
        assert!(Cli::try_parse_from(["quickbook", "create-index", "extra"]).is_err());
    }
}
