use crate::database::{model::review::ReviewRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{KosId, ReviewId, UserId},
    review::{
        event::{CreateReview, DeleteReview, ReplyReview},
        Review,
    },
};
use kernel::repository::review::ReviewRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReviewRepositoryImpl {
    db: ConnectionPool,
}

const REVIEW_SELECT: &str = r#"
    SELECT
        v.review_id,
        v.content,
        v.rating,
        v.reply_content,
        v.reply_at,
        v.replied_by,
        v.user_id,
        u.name AS user_name,
        u.profile_picture,
        v.kos_id,
        k.name AS kos_name,
        v.created_at
    FROM reviews AS v
    INNER JOIN users AS u ON v.user_id = u.user_id
    INNER JOIN kos AS k ON v.kos_id = k.kos_id
"#;

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn create(&self, event: CreateReview) -> AppResult<ReviewId> {
        let kos_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM kos WHERE kos_id = $1)")
                .bind(event.kos_id)
                .fetch_one(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        if !kos_exists {
            return Err(AppError::EntityNotFound("Kos not found".into()));
        }

        // 同じユーザーの二重レビューを禁止
        let already_reviewed = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM reviews WHERE kos_id = $1 AND user_id = $2)",
        )
        .bind(event.kos_id)
        .bind(event.created_by)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if already_reviewed {
            return Err(AppError::UnprocessableEntity(
                "You have already reviewed this kos".into(),
            ));
        }

        let review_id = ReviewId::new();
        sqlx::query(
            r#"
                INSERT INTO reviews (review_id, kos_id, user_id, content, rating)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(review_id)
        .bind(event.kos_id)
        .bind(event.created_by)
        .bind(&event.content)
        .bind(event.rating)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(review_id)
    }

    async fn find_by_id(&self, review_id: ReviewId) -> AppResult<Option<Review>> {
        let sql = format!("{REVIEW_SELECT} WHERE v.review_id = $1");
        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(review_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Review::from))
    }

    async fn find_by_kos_id(&self, kos_id: KosId) -> AppResult<Vec<Review>> {
        let sql = format!("{REVIEW_SELECT} WHERE v.kos_id = $1 ORDER BY v.created_at DESC");
        let rows = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(kos_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn reply(&self, event: ReplyReview) -> AppResult<()> {
        let owned_by = sqlx::query_scalar::<_, UserId>(
            r#"
                SELECT k.owned_by
                FROM reviews AS v
                INNER JOIN kos AS k ON v.kos_id = k.kos_id
                WHERE v.review_id = $1
            "#,
        )
        .bind(event.review_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("Review not found".into()))?;

        // 返信できるのは対象コスのオーナーだけ
        if !event.access.can_manage_kos(owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        let res = sqlx::query(
            r#"
                UPDATE reviews
                SET reply_content = $2, reply_at = CURRENT_TIMESTAMP, replied_by = $3
                WHERE review_id = $1
            "#,
        )
        .bind(event.review_id)
        .bind(&event.reply_content)
        .bind(event.access.caller())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No review record has been updated".into(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteReview) -> AppResult<()> {
        let row = sqlx::query_as::<_, (UserId, UserId)>(
            r#"
                SELECT v.user_id, k.owned_by
                FROM reviews AS v
                INNER JOIN kos AS k ON v.kos_id = k.kos_id
                WHERE v.review_id = $1
            "#,
        )
        .bind(event.review_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some((author, kos_owner)) = row else {
            return Err(AppError::EntityNotFound("Review not found".into()));
        };

        if !event.access.can_delete_review(author, kos_owner) {
            return Err(AppError::ForbiddenOperation);
        }

        sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(event.review_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{register_kos, register_user};
    use kernel::model::{access::AccessControl, role::Role};

    #[sqlx::test(migrations = "../migrations")]
    async fn one_review_per_user_and_kos(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = ReviewRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let renter = register_user(&pool, Role::Society).await;
        let kos_id = register_kos(&pool, &owner).await;

        repo.create(CreateReview::new(
            kos_id,
            "Kamar bersih dan nyaman".into(),
            5,
            renter.user_id,
        ))
        .await?;

        let res = repo
            .create(CreateReview::new(
                kos_id,
                "Ulasan kedua".into(),
                4,
                renter.user_id,
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn owner_reply_is_recorded_with_timestamp(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = ReviewRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let renter = register_user(&pool, Role::Society).await;
        let kos_id = register_kos(&pool, &owner).await;

        let review_id = repo
            .create(CreateReview::new(
                kos_id,
                "Kamar bersih".into(),
                4,
                renter.user_id,
            ))
            .await?;

        // 他人のコスのレビューには返信できない
        let other_owner = register_user(&pool, Role::Owner).await;
        let res = repo
            .reply(ReplyReview::new(
                review_id,
                "Terima kasih!".into(),
                AccessControl::new(other_owner.user_id, Role::Owner),
            ))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation)));

        repo.reply(ReplyReview::new(
            review_id,
            "Terima kasih!".into(),
            AccessControl::new(owner.user_id, Role::Owner),
        ))
        .await?;

        let review = repo.find_by_id(review_id).await?.unwrap();
        let reply = review.reply.unwrap();
        assert_eq!(reply.content, "Terima kasih!");
        assert_eq!(reply.replied_by, owner.user_id);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn author_and_kos_owner_can_delete(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = ReviewRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let renter = register_user(&pool, Role::Society).await;
        let stranger = register_user(&pool, Role::Society).await;
        let kos_id = register_kos(&pool, &owner).await;

        let review_id = repo
            .create(CreateReview::new(
                kos_id,
                "Biasa saja".into(),
                3,
                renter.user_id,
            ))
            .await?;

        let res = repo
            .delete(DeleteReview::new(
                review_id,
                AccessControl::new(stranger.user_id, Role::Society),
            ))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation)));

        repo.delete(DeleteReview::new(
            review_id,
            AccessControl::new(owner.user_id, Role::Owner),
        ))
        .await?;
        assert!(repo.find_by_id(review_id).await?.is_none());
        Ok(())
    }
}
