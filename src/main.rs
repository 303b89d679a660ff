//! VOblako cloud storage mock API server

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voblako::api::{self, AppState};
use voblako::config::Config;

#[derive(Parser)]
#[command(name = "voblako")]
#[command(about = "VOblako cloud storage mock API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the mounted API routes
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voblako=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.rest_port = port;
            }

            let addr = format!("0.0.0.0:{}", config.rest_port).parse()?;
            if config.is_remote() {
                tracing::info!(
                    "{} forwarding /api to {}",
                    config.server_name,
                    config.remote_base_url
                );
            }
            tracing::info!("{} listening on {}", config.server_name, addr);

            let state = AppState::new(config);
            api::rest::serve(addr, state).await?;
        }
        Commands::Routes => {
            print_routes();
        }
    }

    Ok(())
}

fn print_routes() {
    let routes = [
        ("GET", "/api/auth/check"),
        ("POST", "/api/auth/login"),
        ("POST", "/api/auth/signup"),
        ("POST", "/api/auth/logout"),
        ("GET", "/api/storage?path=a/b/c"),
        ("POST", "/api/files"),
        ("POST", "/api/files/list"),
        ("GET", "/api/files/{id}"),
        ("POST", "/api/files/{id}"),
        ("DELETE", "/api/files/{id}"),
        ("GET", "/api/files/{id}/meta"),
        ("POST", "/api/files/{id}/name"),
    ];

    for (method, path) in routes {
        println!("{method:7} {path}");
    }
}
