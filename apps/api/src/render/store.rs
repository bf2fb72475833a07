use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::template::TemplateRow;

pub struct NewTemplate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub html: &'a str,
    pub css: &'a str,
    pub document_type: Option<&'a str>,
}

pub async fn list_templates(pool: &PgPool) -> Result<Vec<TemplateRow>> {
    Ok(
        sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates ORDER BY created_at ASC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_template(pool: &PgPool, id: Uuid) -> Result<Option<TemplateRow>> {
    Ok(
        sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Inserts a template. `None` when the name is already taken (case-insensitive).
pub async fn insert_template(
    pool: &PgPool,
    template: NewTemplate<'_>,
) -> Result<Option<TemplateRow>> {
    let row = sqlx::query_as::<_, TemplateRow>(
        r#"
        INSERT INTO templates (id, name, description, html, css, document_type)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(template.name)
    .bind(template.description)
    .bind(template.html)
    .bind(template.css)
    .bind(template.document_type)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = &row {
        info!("Created template {} ({})", row.name, row.id);
    }
    Ok(row)
}

/// Returns false when no template had that id.
pub async fn delete_template(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM templates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
