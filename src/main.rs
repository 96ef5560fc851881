use clap::Parser;
use sonar_issue_analyzer::errors::ErrorHandler;
use sonar_issue_analyzer::structs::cli::Cli;
use sonar_issue_analyzer::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new(cli.config);

    if let Err(e) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&e);
        return Err(e.into());
    }

    Ok(())
}
