use std::{io::Write, sync::Arc};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use movie_picks::{
    config::Config,
    console::{self, Command, Flow},
    services::HttpBackend,
    SessionController, SessionState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movie_picks=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let backend = Arc::new(HttpBackend::from_config(&config)?);
    tracing::info!(base_url = %backend.base_url(), "Connecting to recommendation backend");

    let mut controller = SessionController::with_backend(backend);
    controller.start().await?;

    println!("{}", console::render_state(&controller));
    if let SessionState::Error(err) = controller.state() {
        anyhow::bail!("Session could not start: {}", err);
    }
    println!("{}", console::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                let (flow, output) = console::execute(&mut controller, command).await;
                println!("{}", output);
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(err) => println!("{}", err),
        }
    }

    Ok(())
}
