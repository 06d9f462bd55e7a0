mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    logging::init_logging(&cfg)?;
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Discover => {
            print::header("reading the arp cache", cfg.quiet);
            discover::discover(&cfg).await
        }
        Commands::Scan(args) => {
            print::header("starting scanner", cfg.quiet);
            scan::scan(args, &cfg).await
        }
    }
}
