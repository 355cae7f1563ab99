use crate::command::Command;
use clap::{ArgGroup, Parser, Subcommand};

/// Switch a smart-socket controller over HTTP
#[derive(Debug, Parser, PartialEq, Eq)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Action {
    /// Send a command to the device (path segment or alias, see `commands`)
    Send { command: Command },

    /// Store the device endpoint; omitted values keep what is stored
    #[command(group(
        ArgGroup::new("endpoint")
            .required(true)
            .multiple(true)
            .args(["host", "port"])
    ))]
    Configure {
        /// IP address or host name of the device
        #[arg(long)]
        host: Option<String>,

        /// Port of the device; 80 uses http and 443 https
        #[arg(long)]
        port: Option<String>,
    },

    /// Print the stored endpoint
    Show,

    /// Forget the stored endpoint
    Reset,

    /// List available commands
    Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, error::ErrorKind};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("socket-remote").chain(args.iter().copied()))
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_print_help() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn parses_send_with_path_or_alias() {
        assert_eq!(
            parse(&["send", "socket1Send"]).unwrap().action,
            Action::Send {
                command: Command::Socket1Send
            }
        );
        assert_eq!(
            parse(&["send", "power"]).unwrap().action,
            Action::Send {
                command: Command::Socket0Send
            }
        );
    }

    #[test]
    fn send_requires_known_command() {
        assert_eq!(
            parse(&["send"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["send", "toggle"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn parses_configure() {
        assert_eq!(
            parse(&["configure", "--port", "8080", "--host", "192.168.0.2"])
                .unwrap()
                .action,
            Action::Configure {
                host: Some("192.168.0.2".to_string()),
                port: Some("8080".to_string()),
            }
        );
        assert_eq!(
            parse(&["configure", "--port", "443"]).unwrap().action,
            Action::Configure {
                host: None,
                port: Some("443".to_string()),
            }
        );
    }

    #[test]
    fn configure_requires_host_or_port() {
        assert_eq!(
            parse(&["configure"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert!(parse(&["configure", "--host"]).is_err());
        assert_eq!(
            parse(&["configure", "--ip", "1.2.3.4"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn rejects_unknown_and_extra_arguments() {
        assert_eq!(
            parse(&["toggle"]).unwrap_err().kind(),
            ErrorKind::InvalidSubcommand
        );
        assert!(parse(&["show", "now"]).is_err());
    }
}
