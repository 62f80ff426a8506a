use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lastfm_timelapse::{
    cli::{self, RunArgs},
    config, error,
    types::ChartType,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a bar chart race video of your scrobbles
    Generate(GenerateOptions),

    /// Print the final standings without rendering
    Table(TableOptions),

    /// Save fetched pages to a local JSON file
    Backup(BackupOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct RunOptions {
    /// Last.fm username
    #[clap(long, short)]
    pub user: Option<String>,

    /// First day to include (YYYY-MM-DD), defaults to a week ago
    #[clap(long)]
    pub from: Option<String>,

    /// Last day to include (YYYY-MM-DD), defaults to today
    #[clap(long)]
    pub to: Option<String>,

    /// What the bars represent
    #[clap(long, short, value_enum)]
    pub chart: Option<ChartType>,

    /// JSON file with username, start_date, end_date and chart_type
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Replay pages from a backup file instead of asking Last.fm
    #[clap(long)]
    pub backup: Option<PathBuf>,
}

impl From<RunOptions> for RunArgs {
    fn from(opt: RunOptions) -> Self {
        RunArgs {
            config: opt.config,
            username: opt.user,
            from: opt.from,
            to: opt.to,
            chart_type: opt.chart,
            backup: opt.backup,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    #[command(flatten)]
    run: RunOptions,

    /// Video file to write, defaults to <user>_<chart>_<from>_<to>.mp4
    #[clap(long, short)]
    output: Option<PathBuf>,

    /// Also export the final table as CSV
    #[clap(long)]
    csv: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct TableOptions {
    #[command(flatten)]
    run: RunOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct BackupOptions {
    #[command(flatten)]
    run: RunOptions,

    /// Backup file to write, defaults to the local data directory
    #[clap(long, short)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Generate(opt) => cli::generate(opt.run.into(), opt.output, opt.csv).await,
        Command::Table(opt) => cli::table(opt.run.into()).await,
        Command::Backup(opt) => cli::backup(opt.run.into(), opt.output).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
