use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tracing_subscriber::EnvFilter;

mod handlers;
mod store;

use store::FileStore;

/// In-memory stand-in for the upload/retrieve tool endpoint
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stub_tools=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = SocketAddr::new(cli.host, cli.port);
    let routes = handlers::routes(FileStore::default());

    tracing::info!("Stub tool server running at http://{}/rest", addr);
    warp::serve(routes).run(addr).await;
}
