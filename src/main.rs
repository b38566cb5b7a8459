use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = util::load_config("config.toml")?;
    let secrets = util::load_secrets()?;

    let repository = repository::init_repository(&secrets.database_url).await?;

    let mailer = mailer::Client::new(
        config.mail.base_url.clone(),
        &secrets.mail_api_key,
        config.mail.from.clone(),
    )?;

    let aws_config = aws_config::load_from_env().await;
    let s3 = aws_sdk_s3::Client::new(&aws_config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let router = api::serve(repository, mailer, s3, config).await?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, router).await?;

    Ok(())
}
