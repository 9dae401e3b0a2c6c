use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "newscheck",
    version,
    about = "Check article text against a remote fake-news analysis service"
)]
pub(crate) struct Args {
    /// Client config (TOML). Falls back to built-in defaults when the default path is missing.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Overrides `base_url` from the config file.
    #[arg(long)]
    pub(crate) base_url: Option<String>,
    /// Talk to a `/predict` deployment instead of `/analyze`.
    #[arg(long, default_value_t = false)]
    pub(crate) predict: bool,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    /// Analyze this text once, print the result and exit.
    #[arg(long)]
    pub(crate) text: Option<String>,
    /// Source url sent along with `--text`.
    #[arg(long, requires = "text")]
    pub(crate) url: Option<String>,
    /// Probe the service health endpoint and exit.
    #[arg(long, default_value_t = false, conflicts_with = "text")]
    pub(crate) health: bool,
}
