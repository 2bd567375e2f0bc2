use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lead-gateway")]
#[command(about = "Validate and deliver landing page leads with bounded retries")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the form fields and deliver them to the endpoint
    Submit(SubmitArgs),

    /// Print a phone number the way the input mask shows it
    FormatPhone {
        /// Raw phone input, separators allowed
        raw: String,
    },

    /// Print the frames of an animated counter label such as "500+"
    Counter {
        label: String,

        #[arg(long, default_value = "10")]
        frames: usize,
    },
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub age: String,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the endpoint URL from config
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Validate and show the payload without sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit_command() {
        let cli = Cli::try_parse_from([
            "lead-gateway",
            "submit",
            "--name",
            "Aziz",
            "--phone",
            "90 123 45 67",
            "--age",
            "25-34",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Submit(args) => {
                assert_eq!(args.name, "Aziz");
                assert_eq!(args.phone, "90 123 45 67");
                assert!(args.config.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_counter_frames_default() {
        let cli = Cli::try_parse_from(["lead-gateway", "counter", "500+"]).unwrap();
        match cli.command {
            Command::Counter { label, frames } => {
                assert_eq!(label, "500+");
                assert_eq!(frames, 10);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
