use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tdiff",
    about = "Compare transcripts line by line and word by word",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with comparison settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the modified-pair threshold (0-100)
    #[arg(long, global = true)]
    pub threshold: Option<f64>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show changed lines and words between two transcripts
    Compare(CompareArgs),
    /// Print only the similarity of two transcripts
    Score(ScoreArgs),
    /// Compare every pair listed in a JSON manifest
    Batch(BatchArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Reference (ground-truth) transcript
    pub left: PathBuf,
    /// Hypothesis (generated) transcript
    pub right: PathBuf,
}

#[derive(Args)]
pub struct ScoreArgs {
    pub left: PathBuf,
    pub right: PathBuf,
}

#[derive(Args)]
pub struct BatchArgs {
    pub manifest: PathBuf,
    #[arg(short = 'j', long, default_value = "4")]
    pub concurrency: usize,
    /// Only print the summary, not every row
    #[arg(long)]
    pub summary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compare() {
        let cli = Cli::try_parse_from(["tdiff", "compare", "truth.txt", "asr.txt"]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.left, PathBuf::from("truth.txt"));
            assert_eq!(args.right, PathBuf::from("asr.txt"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_compare_requires_two_files() {
        assert!(Cli::try_parse_from(["tdiff", "compare", "truth.txt"]).is_err());
    }

    #[test]
    fn parse_score() {
        let cli = Cli::try_parse_from(["tdiff", "score", "a", "b"]).unwrap();
        assert!(matches!(cli.command, Command::Score(_)));
    }

    #[test]
    fn parse_batch_defaults() {
        let cli = Cli::try_parse_from(["tdiff", "batch", "rows.json"]).unwrap();
        if let Command::Batch(args) = cli.command {
            assert_eq!(args.manifest, PathBuf::from("rows.json"));
            assert_eq!(args.concurrency, 4);
            assert!(!args.summary);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_batch_concurrency() {
        let cli =
            Cli::try_parse_from(["tdiff", "batch", "-j", "16", "--summary", "rows.json"]).unwrap();
        if let Command::Batch(args) = cli.command {
            assert_eq!(args.concurrency, 16);
            assert!(args.summary);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_global_settings() {
        let cli = Cli::try_parse_from([
            "tdiff", "compare", "a", "b", "--config", "tdiff.toml", "--threshold", "60",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tdiff.toml")));
        assert_eq!(cli.threshold, Some(60.0));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["tdiff", "--verbose", "score", "a", "b"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["tdiff", "--format", "json", "score", "a", "b"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
