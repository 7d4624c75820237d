use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nlquery_web::{
    AppState, Args, Mode,
    core::{controller::QueryFormController, page::MemoryPage, query_client::QueryClient},
    repl, web,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.mode {
        Mode::Serve => {
            let app = web::router(AppState::new(&args));
            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;

            info!("Server running on http://0.0.0.0:{}", args.port);
            axum::serve(listener, app).await?;
        }
        Mode::Repl => {
            let endpoint = args.query_endpoint();
            info!("Sending queries to {endpoint}");

            let client = QueryClient::new(endpoint, None);
            let mut controller =
                QueryFormController::with_guard(MemoryPage::new(), client, args.loading_guard());

            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            repl::run(&mut controller, stdin.lock(), &mut stdout).await?;
        }
    }

    Ok(())
}
