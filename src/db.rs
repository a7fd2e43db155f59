use sqlx::{PgPool, postgres::PgPoolOptions};

pub async fn connect_pg(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Idempotent bootstrap of the invite table (gen_random_uuid needs PG 13+).
async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invites (
          invite_id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
          doctor_id TEXT NOT NULL,
          phone TEXT NOT NULL,
          sent_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS invites_sent_at_idx
        ON invites (sent_at DESC)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("invites schema ready");
    Ok(())
}
