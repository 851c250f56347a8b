use crate::database::{model::facility::FacilityRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    facility::{
        event::{CreateKosFacility, CreateRoomFacility, DeleteFacility, UpdateFacility},
        Facility, FacilityType,
    },
    id::{FacilityId, KosId, RoomId, UserId},
};
use kernel::repository::facility::FacilityRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct FacilityRepositoryImpl {
    db: ConnectionPool,
}

const FACILITY_SELECT: &str = r#"
    SELECT
        facility_id,
        name,
        description,
        icon,
        facility_type,
        kos_id,
        room_id
    FROM facilities
"#;

#[async_trait]
impl FacilityRepository for FacilityRepositoryImpl {
    async fn create_for_kos(&self, event: CreateKosFacility) -> AppResult<FacilityId> {
        let owned_by =
            sqlx::query_scalar::<_, UserId>("SELECT owned_by FROM kos WHERE kos_id = $1")
                .bind(event.kos_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?
                .ok_or_else(|| AppError::EntityNotFound("Kos not found".into()))?;

        if !event.access.can_manage_kos(owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        let facility_id = FacilityId::new();
        sqlx::query(
            r#"
                INSERT INTO facilities (facility_id, name, description, icon, facility_type, kos_id)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(facility_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.icon)
        .bind(FacilityType::KosFacility.to_string())
        .bind(event.kos_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(facility_id)
    }

    async fn create_for_room(&self, event: CreateRoomFacility) -> AppResult<FacilityId> {
        // 部屋の設備はその部屋が属するコスのオーナーだけが追加できる
        let owned_by = sqlx::query_scalar::<_, UserId>(
            r#"
                SELECT k.owned_by
                FROM rooms AS r
                INNER JOIN kos AS k ON r.kos_id = k.kos_id
                WHERE r.room_id = $1
            "#,
        )
        .bind(event.room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("Room not found".into()))?;

        if !event.access.can_manage_kos(owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        let facility_id = FacilityId::new();
        sqlx::query(
            r#"
                INSERT INTO facilities (facility_id, name, description, icon, facility_type, room_id)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(facility_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.icon)
        .bind(FacilityType::RoomFacility.to_string())
        .bind(event.room_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(facility_id)
    }

    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>> {
        let sql = format!("{FACILITY_SELECT} WHERE facility_id = $1");
        sqlx::query_as::<_, FacilityRow>(&sql)
            .bind(facility_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Facility::try_from)
            .transpose()
    }

    async fn find_by_kos_id(&self, kos_id: KosId) -> AppResult<Vec<Facility>> {
        let sql = format!(
            "{FACILITY_SELECT} WHERE kos_id = $1 AND facility_type = 'KOS_FACILITY' ORDER BY name"
        );
        sqlx::query_as::<_, FacilityRow>(&sql)
            .bind(kos_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Facility::try_from)
            .collect()
    }

    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Facility>> {
        let sql = format!(
            "{FACILITY_SELECT} WHERE room_id = $1 AND facility_type = 'ROOM_FACILITY' ORDER BY name"
        );
        sqlx::query_as::<_, FacilityRow>(&sql)
            .bind(room_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Facility::try_from)
            .collect()
    }

    async fn update(&self, event: UpdateFacility) -> AppResult<()> {
        let owned_by = self.fetch_parent_owner(event.facility_id).await?;

        if !event.access.can_manage_kos(owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        let res = sqlx::query(
            r#"
                UPDATE facilities
                SET
                    name = COALESCE($2, name),
                    description = COALESCE($3, description),
                    icon = COALESCE($4, icon)
                WHERE facility_id = $1
            "#,
        )
        .bind(event.facility_id)
        .bind(event.name)
        .bind(event.description)
        .bind(event.icon)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No facility record has been updated".into(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteFacility) -> AppResult<()> {
        let owned_by = self.fetch_parent_owner(event.facility_id).await?;

        if !event.access.can_manage_kos(owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        sqlx::query("DELETE FROM facilities WHERE facility_id = $1")
            .bind(event.facility_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }
}

impl FacilityRepositoryImpl {
    // 親がコスでも部屋でも、たどり着くオーナーは一人に決まる
    async fn fetch_parent_owner(&self, facility_id: FacilityId) -> AppResult<UserId> {
        sqlx::query_scalar::<_, UserId>(
            r#"
                SELECT COALESCE(k.owned_by, rk.owned_by)
                FROM facilities AS f
                LEFT JOIN kos AS k ON f.kos_id = k.kos_id
                LEFT JOIN rooms AS r ON f.room_id = r.room_id
                LEFT JOIN kos AS rk ON r.kos_id = rk.kos_id
                WHERE f.facility_id = $1
            "#,
        )
        .bind(facility_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("Facility not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{register_kos, register_room, register_user};
    use kernel::model::{access::AccessControl, facility::FacilityParent, role::Role};

    #[sqlx::test(migrations = "../migrations")]
    async fn kos_and_room_facilities_are_kept_apart(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = FacilityRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let access = AccessControl::new(owner.user_id, Role::Owner);
        let kos_id = register_kos(&pool, &owner).await;
        let room_id = register_room(&pool, kos_id, &owner, "A1", 900_000).await;

        repo.create_for_kos(CreateKosFacility::new(
            kos_id,
            "WiFi".into(),
            "Internet kecepatan tinggi".into(),
            "wifi-icon.png".into(),
            access,
        ))
        .await?;
        repo.create_for_room(CreateRoomFacility::new(
            room_id,
            "AC".into(),
            String::new(),
            String::new(),
            access,
        ))
        .await?;

        let kos_facilities = repo.find_by_kos_id(kos_id).await?;
        assert_eq!(kos_facilities.len(), 1);
        assert_eq!(kos_facilities[0].name, "WiFi");
        assert_eq!(kos_facilities[0].parent, FacilityParent::Kos(kos_id));

        let room_facilities = repo.find_by_room_id(room_id).await?;
        assert_eq!(room_facilities.len(), 1);
        assert_eq!(room_facilities[0].parent, FacilityParent::Room(room_id));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn only_the_parent_owner_may_mutate(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = FacilityRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let intruder = register_user(&pool, Role::Owner).await;
        let access = AccessControl::new(owner.user_id, Role::Owner);
        let kos_id = register_kos(&pool, &owner).await;

        let facility_id = repo
            .create_for_kos(CreateKosFacility::new(
                kos_id,
                "WiFi".into(),
                String::new(),
                String::new(),
                access,
            ))
            .await?;

        let res = repo
            .delete(DeleteFacility::new(
                facility_id,
                AccessControl::new(intruder.user_id, Role::Owner),
            ))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation)));

        repo.delete(DeleteFacility::new(facility_id, access)).await?;
        assert!(repo.find_by_id(facility_id).await?.is_none());
        Ok(())
    }
}
