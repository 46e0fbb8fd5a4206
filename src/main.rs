use clap::Parser;
use env_logger::Env;
use holidaze_lib::commands::{run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
