use anyhow::Result;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::document::DocumentRow;

pub struct NewDocument<'a> {
    pub user_id: Uuid,
    pub document_type: &'a str,
    pub title: &'a str,
    pub template_id: Option<&'a str>,
    pub data: &'a Value,
}

pub async fn insert_document(pool: &PgPool, doc: NewDocument<'_>) -> Result<DocumentRow> {
    let row = sqlx::query_as::<_, DocumentRow>(
        r#"
        INSERT INTO documents (id, user_id, document_type, title, template_id, data)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(doc.user_id)
    .bind(doc.document_type)
    .bind(doc.title)
    .bind(doc.template_id)
    .bind(doc.data)
    .fetch_one(pool)
    .await?;

    info!("Created {} document {} for user {}", row.document_type, row.id, row.user_id);
    Ok(row)
}

/// Lists a user's documents, most recently edited first.
pub async fn list_documents(pool: &PgPool, user_id: Uuid) -> Result<Vec<DocumentRow>> {
    Ok(sqlx::query_as::<_, DocumentRow>(
        "SELECT * FROM documents WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Fetches a document only if it belongs to `user_id`.
pub async fn get_document(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<DocumentRow>> {
    Ok(sqlx::query_as::<_, DocumentRow>(
        "SELECT * FROM documents WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// Replaces title, template and body in one statement. `None` when nothing matched.
pub async fn replace_document(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    title: &str,
    template_id: Option<&str>,
    data: &Value,
) -> Result<Option<DocumentRow>> {
    Ok(sqlx::query_as::<_, DocumentRow>(
        r#"
        UPDATE documents
        SET title = $3, template_id = $4, data = $5, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(template_id)
    .bind(data)
    .fetch_optional(pool)
    .await?)
}

pub async fn delete_document(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
