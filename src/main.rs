use clap::Parser;
use relay::cli::{
    dashboard, handle_completions, handle_config_init, insights, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => relay::cli::serve::run_serve(args).await,
        Commands::Dashboard(args) => dashboard::handle_dashboard(&args)
            .await
            .map(|output| println!("{}", output)),
        Commands::Insights(args) => insights::handle_insights(&args)
            .await
            .map(|output| println!("{}", output)),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
