use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use employee_registry::{api, config::ServerConfig, service::EmployeeService};

#[derive(Parser)]
#[command(name = "employees")]
#[command(about = "Employee records server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Create or upgrade the database schema, then exit
    Migrate(ServeArgs),
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port for HTTP API
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long, conflicts_with = "database")]
    memory: bool,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig::from_env().with_overrides(self.host, self.port, self.database, self.memory)
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "employee_registry=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = config.database.open()?;
    let app = api::create_router(EmployeeService::new(Arc::new(db)));

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Employee server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args.into_config()).await?,
        Some(Commands::Migrate(args)) => {
            let config = args.into_config();
            config.database.open()?;
            tracing::info!("Database schema is up to date ({:?})", config.database);
        }
        None => serve(ServeArgs::default().into_config()).await?,
    }

    Ok(())
}
