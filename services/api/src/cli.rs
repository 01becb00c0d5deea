use crate::demo::{run_demo, run_report, run_track, DemoArgs, ReportArgs, TrackArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fra_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FRA Citizen Portal",
    about = "Serve the Forest Rights Act citizen portal or drive it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk a sample citizen through the four-step application wizard
    Demo(DemoArgs),
    /// Look up the status and timeline of a submitted application
    Track(TrackArgs),
    /// Export the application status report as CSV
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Track(args) => run_track(args),
        Command::Report(args) => run_report(args),
    }
}
