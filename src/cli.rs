//! Interface de linha de comando do review-notifier baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, check)
//! e flags globais (--config, --retry-secs, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// review-notifier — avisa no Telegram quando o status de revisão muda.
#[derive(Debug, Parser)]
#[command(name = "review-notifier", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho do arquivo de configuração TOML.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Intervalo entre ciclos em segundos (sobrescreve o arquivo).
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub retry_secs: Option<u64>,

    /// Habilita logs de debug.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Consulta a API periodicamente até o processo ser encerrado.
    Run {
        /// Executa um único ciclo e sai.
        #[arg(long, default_value_t = false)]
        once: bool,
    },

    /// Verifica se todas as credenciais estão presentes e sai.
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run_subcommand() {
        let cli = Cli::parse_from(["review-notifier", "run"]);
        assert!(matches!(cli.command, Command::Run { once: false }));
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parses_run_once() {
        let cli = Cli::parse_from(["review-notifier", "run", "--once"]);
        assert!(matches!(cli.command, Command::Run { once: true }));
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "review-notifier",
            "--config",
            "/etc/review-notifier.toml",
            "--retry-secs",
            "30",
            "--verbose",
            "check",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.retry_secs, Some(30));
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/etc/review-notifier.toml"))
        );
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn cli_rejects_zero_retry_secs() {
        let result = Cli::try_parse_from(["review-notifier", "--retry-secs", "0", "run"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
