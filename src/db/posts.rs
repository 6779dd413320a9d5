use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{CreatePostRequest, Post, PostId, PostRow, Thread, ThreadId};

impl super::Database {
    /// Create a batch of posts in a thread.
    /// Uses a transaction so the batch shares one timestamp and gets
    /// consecutive ids in request order, or is not created at all.
    pub async fn create_posts(
        &self,
        thread: &Thread,
        reqs: &[CreatePostRequest],
    ) -> Result<Vec<Post>> {
        let mut tx = self.pool.begin().await?;

        let (created,): (DateTime<Utc>,) = sqlx::query_as("SELECT NOW()")
            .fetch_one(&mut *tx)
            .await?;

        let mut posts = Vec::with_capacity(reqs.len());
        for req in reqs {
            if req.parent != 0 {
                // Parents created earlier in this batch are visible inside the transaction
                let parent: Option<(ThreadId,)> =
                    sqlx::query_as("SELECT thread FROM posts WHERE id = $1")
                        .bind(req.parent)
                        .fetch_optional(&mut *tx)
                        .await?;

                match parent {
                    None => {
                        return Err(AppError::NotFound(format!(
                            "Can't find parent post {}",
                            req.parent
                        )))
                    }
                    Some((parent_thread,)) if parent_thread != thread.id => {
                        return Err(AppError::Conflict(format!(
                            "Parent post {} was created in another thread",
                            req.parent
                        )))
                    }
                    Some(_) => {}
                }
            }

            let row = sqlx::query_as::<_, PostRow>(
                r#"
                INSERT INTO posts (thread, parent, author, message, forum, created)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(thread.id)
            .bind(req.parent)
            .bind(&req.author)
            .bind(&req.message)
            .bind(&thread.forum)
            .bind(created)
            .fetch_one(&mut *tx)
            .await?;

            posts.push(row.into());
        }

        tx.commit().await?;

        Ok(posts)
    }

    /// Get a post by ID
    pub async fn get_post(&self, id: PostId) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't find post with id {}", id)))?;
        Ok(row.into())
    }

    /// Replace a post's message and mark it as edited
    pub async fn update_post(&self, id: PostId, message: &str) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            "UPDATE posts SET message = $1, is_edited = TRUE WHERE id = $2 RETURNING *",
        )
        .bind(message)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Can't find post with id {}", id)))?;
        Ok(row.into())
    }

    /// Every post of a thread, in creation order.
    /// A single statement, so the snapshot never holds a reply without its parent.
    pub async fn get_thread_posts(&self, thread_id: ThreadId) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT * FROM posts WHERE thread = $1 ORDER BY id ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
