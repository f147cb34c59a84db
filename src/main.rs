use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use carexpert::{
    Commands, Container, ContainerConfig, Locale, Router, SessionController, SessionReply,
};

#[derive(Parser)]
#[command(name = "carexpert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer from a built-in mock instead of calling Gemini
    #[arg(long, global = true)]
    mock_model: bool,

    /// Reply language (ar, en)
    #[arg(short, long, global = true, default_value = "ar")]
    locale: String,

    /// Gemini model name; overrides GEMINI_MODEL
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        mock_model: cli.mock_model,
        locale: Locale::from_str(&cli.locale),
        model: cli.model,
    });
    info!(
        "Using model {} (locale {})",
        container.model_name(),
        container.locale().as_str()
    );

    match cli.command {
        Commands::Chat => run_session(&container).await,
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
            Ok(())
        }
    }
}

async fn run_session(container: &Container) -> Result<()> {
    let mut controller = SessionController::new(container);
    println!("{}\n", controller.greeting());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match controller.handle(&line).await? {
            SessionReply::Output(output) if output.is_empty() => {}
            SessionReply::Output(output) => println!("{}\n", output),
            SessionReply::Quit => break,
        }
    }

    Ok(())
}
