use anyhow::Context;

use signup_form::config::{RunMode, SignupConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = SignupConfig::from_env().context("reading SIGNUP_* environment")?;

    eprintln!("📝 signup-form v{}", env!("CARGO_PKG_VERSION"));

    match config.mode {
        RunMode::Http => {
            eprintln!("   Form API: http://{}/api/signup", config.bind_addr());
            eprintln!("   Form WS:  ws://{}/ws", config.bind_addr());
            eprintln!(
                "   CORS:     {}\n",
                config
                    .cors_origin
                    .as_ref()
                    .and_then(|origin| origin.to_str().ok())
                    .unwrap_or("any origin")
            );
            signup_form::server::serve(&config)
                .await
                .context("running sign-up server")?;
        }
        RunMode::Cli => {
            signup_form::cli::run().await.context("reading stdin")?;
        }
    }

    Ok(())
}
