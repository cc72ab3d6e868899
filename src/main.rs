use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use effort_estimator::api::{self, AppState};
use effort_estimator::config::EstimatorConfig;
use effort_estimator::estimate::EstimationSession;
use effort_estimator::report;

#[derive(Parser)]
#[command(name = "estimator")]
#[command(about = "T-shirt size effort estimation for frontend projects")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port for HTTP API (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List projects with their total effort
    Projects,
    /// Show the grouped effort breakdown of a project
    Show {
        /// Project id
        id: Uuid,
    },
    /// Ask the configured provider to size a feature description
    Suggest {
        /// Feature description
        description: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "effort_estimator=debug,tower_http=debug".into()),
    );

    // Logs go to stderr so report output on stdout stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(config: &EstimatorConfig, port: u16) -> anyhow::Result<()> {
    let db = config.open_database()?;
    db.migrate()?;

    let app = api::create_router(AppState::new(db, config.suggester()));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Estimator listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = EstimatorConfig::load();

    match cli.command {
        Some(Commands::Serve { port }) => {
            serve(&config, port.unwrap_or(config.port)).await?;
        }
        Some(Commands::Projects) => {
            let db = config.open_database()?;
            db.migrate()?;
            print!("{}", report::render_summaries(&db.get_project_summaries()?));
        }
        Some(Commands::Show { id }) => {
            let db = config.open_database()?;
            db.migrate()?;
            let session = EstimationSession::load(&db, id)?;
            print!("{}", report::render_estimate(&session.view()));
        }
        Some(Commands::Suggest { description }) => {
            let suggester = config.suggester();
            let suggestion =
                EstimationSession::request_size_suggestion(suggester.as_ref(), &description)
                    .await;
            match suggestion.size {
                Some(size) => println!(
                    "{} ({} hours)\n{}",
                    size,
                    report::format_hours(suggestion.hours),
                    suggestion.reasoning
                ),
                None => println!("{}", suggestion.reasoning),
            }
        }
        None => {
            serve(&config, config.port).await?;
        }
    }

    Ok(())
}
