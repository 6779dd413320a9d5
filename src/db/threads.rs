use crate::error::{AppError, Result};
use crate::models::{CreateThreadRequest, Thread, ThreadRef, UpdateThreadRequest};

impl super::Database {
    /// Open a new thread in a forum
    pub async fn create_thread(&self, forum: &str, req: &CreateThreadRequest) -> Result<Thread> {
        let result = sqlx::query_as::<_, Thread>(
            r#"
            INSERT INTO threads (slug, title, author, forum, message, created)
            VALUES (NULLIF($1, ''), $2, $3, $4, $5, COALESCE($6, NOW()))
            RETURNING *
            "#,
        )
        .bind(req.slug.as_deref())
        .bind(&req.title)
        .bind(&req.author)
        .bind(forum)
        .bind(&req.message)
        .bind(req.created)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(thread) => Ok(thread),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict(format!(
                    "Thread with slug '{}' already exists",
                    req.slug.as_deref().unwrap_or_default()
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a thread by numeric id or by slug (case-insensitive)
    pub async fn get_thread(&self, slug_or_id: &str) -> Result<Thread> {
        let thread = match ThreadRef::parse(slug_or_id) {
            ThreadRef::Id(id) => {
                sqlx::query_as::<_, Thread>("SELECT * FROM threads WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            ThreadRef::Slug(slug) => {
                sqlx::query_as::<_, Thread>("SELECT * FROM threads WHERE LOWER(slug) = LOWER($1)")
                    .bind(slug)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        thread.ok_or_else(|| {
            AppError::NotFound(format!("Can't find thread with id or slug '{}'", slug_or_id))
        })
    }

    /// Change a thread's title and/or message.
    /// Empty fields keep their stored value, so an empty request returns the thread as is.
    pub async fn update_thread(
        &self,
        slug_or_id: &str,
        req: &UpdateThreadRequest,
    ) -> Result<Thread> {
        let thread = self.get_thread(slug_or_id).await?;
        if req.is_empty() {
            return Ok(thread);
        }

        let updated = sqlx::query_as::<_, Thread>(
            r#"
            UPDATE threads
            SET title = COALESCE($2, title), message = COALESCE($3, message)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(thread.id)
        .bind(req.title())
        .bind(req.message())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Can't find thread with id {}", thread.id)))?;

        Ok(updated)
    }
}
