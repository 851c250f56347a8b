use crate::database::{model::kos::KosRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{KosId, UserId},
    kos::{
        event::{CreateKos, DeleteKos, UpdateKos},
        Kos, KosSearch,
    },
};
use kernel::repository::kos::KosRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct KosRepositoryImpl {
    db: ConnectionPool,
}

// 一覧と詳細で共通の SELECT 句
const KOS_SELECT: &str = r#"
    SELECT
        k.kos_id,
        k.name,
        k.alamat,
        k.description,
        k.peraturan_kos,
        k.gender_type,
        k.total_rooms,
        k.available_rooms,
        k.kos_picture,
        k.owned_by,
        o.name AS owner_name,
        o.phone_number AS owner_phone_number
    FROM kos AS k
    INNER JOIN users AS o ON k.owned_by = o.user_id
"#;

#[async_trait]
impl KosRepository for KosRepositoryImpl {
    async fn create(&self, event: CreateKos) -> AppResult<KosId> {
        let kos_id = KosId::new();
        // total_rooms と available_rooms は 0 で始まり、部屋の操作だけが動かす
        let res = sqlx::query(
            r#"
                INSERT INTO kos
                (kos_id, name, alamat, description, peraturan_kos, gender_type, kos_picture, owned_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(kos_id)
        .bind(&event.name)
        .bind(&event.alamat)
        .bind(&event.description)
        .bind(&event.peraturan_kos)
        .bind(event.gender_type.to_string())
        .bind(&event.kos_picture)
        .bind(event.owned_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No kos record has been created".into(),
            ));
        }

        Ok(kos_id)
    }

    async fn find_all(&self, search: KosSearch) -> AppResult<Vec<Kos>> {
        let sql = format!(
            r#"
                {KOS_SELECT}
                WHERE ($1::text IS NULL OR k.name ILIKE '%' || $1 || '%')
                  AND ($2::text IS NULL OR k.gender_type = $2)
                ORDER BY k.created_at DESC
            "#
        );
        sqlx::query_as::<_, KosRow>(&sql)
            .bind(search.keyword)
            .bind(search.gender_type.map(|g| g.to_string()))
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Kos::try_from)
            .collect()
    }

    async fn find_by_id(&self, kos_id: KosId) -> AppResult<Option<Kos>> {
        let sql = format!("{KOS_SELECT} WHERE k.kos_id = $1");
        sqlx::query_as::<_, KosRow>(&sql)
            .bind(kos_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Kos::try_from)
            .transpose()
    }

    async fn update(&self, event: UpdateKos) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owned_by =
            sqlx::query_scalar::<_, UserId>("SELECT owned_by FROM kos WHERE kos_id = $1")
                .bind(event.kos_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?
                .ok_or_else(|| AppError::EntityNotFound("Kos not found".into()))?;

        if !event.access.can_manage_kos(owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        // カウンターは更新対象に含めない
        let res = sqlx::query(
            r#"
                UPDATE kos
                SET
                    name = COALESCE($2, name),
                    alamat = COALESCE($3, alamat),
                    description = COALESCE($4, description),
                    peraturan_kos = COALESCE($5, peraturan_kos),
                    gender_type = COALESCE($6, gender_type),
                    kos_picture = COALESCE($7, kos_picture)
                WHERE kos_id = $1
            "#,
        )
        .bind(event.kos_id)
        .bind(event.name)
        .bind(event.alamat)
        .bind(event.description)
        .bind(event.peraturan_kos)
        .bind(event.gender_type.map(|g| g.to_string()))
        .bind(event.kos_picture)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No kos record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteKos) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owned_by =
            sqlx::query_scalar::<_, UserId>("SELECT owned_by FROM kos WHERE kos_id = $1")
                .bind(event.kos_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?
                .ok_or_else(|| AppError::EntityNotFound("Kos not found".into()))?;

        if !event.access.can_manage_kos(owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        // 部屋・設備・レビューは外部キーの CASCADE で一緒に消える
        sqlx::query("DELETE FROM kos WHERE kos_id = $1")
            .bind(event.kos_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{register_kos, register_user};
    use kernel::model::{access::AccessControl, kos::GenderType, role::Role};

    #[sqlx::test(migrations = "../migrations")]
    async fn created_kos_starts_with_zero_counters(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = KosRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let kos_id = register_kos(&pool, &owner).await;

        let kos = repo.find_by_id(kos_id).await?.unwrap();
        assert_eq!(kos.total_rooms, 0);
        assert_eq!(kos.available_rooms, 0);
        assert_eq!(kos.owner.owner_id, owner.user_id);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn only_the_owning_owner_can_update(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = KosRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let other_owner = register_user(&pool, Role::Owner).await;
        let kos_id = register_kos(&pool, &owner).await;

        let update = |access: AccessControl| UpdateKos {
            kos_id,
            name: Some("Kos Anggrek".into()),
            alamat: None,
            description: None,
            peraturan_kos: None,
            gender_type: Some(GenderType::FemaleOnly),
            kos_picture: None,
            access,
        };

        let res = repo
            .update(update(AccessControl::new(other_owner.user_id, Role::Owner)))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation)));

        repo.update(update(AccessControl::new(owner.user_id, Role::Owner)))
            .await?;
        let kos = repo.find_by_id(kos_id).await?.unwrap();
        assert_eq!(kos.name, "Kos Anggrek");
        assert_eq!(kos.gender_type, GenderType::FemaleOnly);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn search_filters_by_keyword_and_gender(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = KosRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        register_kos(&pool, &owner).await;

        let hit = repo
            .find_all(KosSearch {
                keyword: Some("mawar".into()),
                gender_type: Some(GenderType::Mixed),
            })
            .await?;
        assert_eq!(hit.len(), 1);

        let miss = repo
            .find_all(KosSearch {
                keyword: Some("mawar".into()),
                gender_type: Some(GenderType::MaleOnly),
            })
            .await?;
        assert!(miss.is_empty());
        Ok(())
    }
}
