use clap::Parser;
use env_logger::Env;
use smtp2chat::{Cli, Config, SmtpServer};

fn main() {
    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(Env::new().filter_or("RUST_LOG", config.log_filter())).init();

    let notifier = match config.notifier() {
        Ok(notifier) => notifier,
        Err(e) => {
            eprintln!("Failed to create notifier: {e}");
            std::process::exit(1);
        }
    };

    let server = SmtpServer::new(&config.hostname);
    if let Err(e) = server.start(&config.bind, notifier) {
        eprintln!("Failed to start server: {e}");
        std::process::exit(1);
    }
}
