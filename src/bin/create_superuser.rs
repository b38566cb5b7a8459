//! One-off: ensure a superuser account exists. Safe to run repeatedly.

use entity::prelude::UserEntity;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let secrets = util::load_secrets()?;
    let repository = repository::init_repository(&secrets.database_url).await?;

    if repository.user.find_superuser().await?.is_some() {
        info!("superuser already exists");
        return Ok(());
    }

    let id = repository
        .user
        .save(UserEntity {
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            sub: "admin".to_string(),
            is_superuser: true,
            ..Default::default()
        })
        .await?;

    info!(id, "superuser created");

    Ok(())
}
