use crate::assess::{run_assessment, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use marketplace_admin::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Marketplace Admin",
    about = "Run the marketplace vendor administration service or assess vendor exports offline",
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
    /// Work with vendor directory exports without starting the server
    Vendors {
        #[command(subcommand)]
        command: VendorsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum VendorsCommand {
    /// Derive urgency, risk, and compliance for every vendor in a JSON export
    Assess(AssessArgs),
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
        Command::Vendors {
            command: VendorsCommand::Assess(args),
        } => run_assessment(args),
    }
}
