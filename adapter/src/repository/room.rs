use crate::database::{
    model::{
        kos::KosCountersRow,
        room::{RoomRow, RoomStateRow},
    },
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{KosId, RoomId, UserId},
    kos::KosCounters,
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room, RoomStatus,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};
use std::str::FromStr;

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

const ROOM_SELECT: &str = r#"
    SELECT
        r.room_id,
        r.room_number,
        r.tipe,
        r.harga,
        r.status,
        r.room_picture,
        r.kos_id,
        k.name AS kos_name,
        k.alamat,
        k.owned_by
    FROM rooms AS r
    INNER JOIN kos AS k ON r.kos_id = k.kos_id
"#;

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<(RoomId, KosCounters)> {
        let mut tx = self.db.begin().await?;

        // カウンター更新が同じコスへの同時操作とぶつからないよう直列化する
        self.set_transaction_serializable(&mut tx).await?;

        // ① コスの存在とオーナー確認
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

        // ② 同じコス内での部屋番号の重複を禁止
        let duplicated = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM rooms WHERE kos_id = $1 AND room_number = $2)",
        )
        .bind(event.kos_id)
        .bind(&event.room_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if duplicated {
            return Err(AppError::UnprocessableEntity(format!(
                "Room number {} already exists in this kos",
                event.room_number
            )));
        }

        // ③ 部屋を登録し、コスのカウンターを相対更新で追従させる
        let room_id = RoomId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO rooms (room_id, kos_id, room_number, tipe, harga, status, room_picture)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(room_id)
        .bind(event.kos_id)
        .bind(&event.room_number)
        .bind(&event.tipe)
        .bind(event.harga)
        .bind(RoomStatus::Available.to_string())
        .bind(&event.room_picture)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been created".into(),
            ));
        }

        let counters = sqlx::query_as::<_, KosCountersRow>(
            r#"
                UPDATE kos
                SET total_rooms = total_rooms + 1, available_rooms = available_rooms + 1
                WHERE kos_id = $1
                RETURNING kos_id, name, total_rooms, available_rooms
            "#,
        )
        .bind(event.kos_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok((room_id, counters.into()))
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let sql = format!("{ROOM_SELECT} WHERE r.room_id = $1");
        sqlx::query_as::<_, RoomRow>(&sql)
            .bind(room_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Room::try_from)
            .transpose()
    }

    async fn find_by_kos_id(
        &self,
        kos_id: KosId,
        status: Option<RoomStatus>,
    ) -> AppResult<Vec<Room>> {
        let sql = format!(
            r#"
                {ROOM_SELECT}
                WHERE r.kos_id = $1
                  AND ($2::text IS NULL OR r.status = $2)
                ORDER BY r.room_number ASC
            "#
        );
        sqlx::query_as::<_, RoomRow>(&sql)
            .bind(kos_id)
            .bind(status.map(|s| s.to_string()))
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Room::try_from)
            .collect()
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let state = self.fetch_state(&mut tx, event.room_id).await?;

        if !event.access.can_manage_kos(state.owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        // 部屋番号を変えるときは、自分自身を除いて重複を確認する
        if let Some(new_number) = &event.room_number {
            if *new_number != state.room_number {
                let duplicated = sqlx::query_scalar::<_, bool>(
                    r#"
                        SELECT EXISTS (
                            SELECT 1 FROM rooms
                            WHERE kos_id = $1 AND room_number = $2 AND room_id <> $3
                        )
                    "#,
                )
                .bind(state.kos_id)
                .bind(new_number)
                .bind(event.room_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                if duplicated {
                    return Err(AppError::UnprocessableEntity(format!(
                        "Room number {new_number} already exists in this kos"
                    )));
                }
            }
        }

        let old_status = RoomStatus::from_str(&state.status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;

        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET
                    room_number = COALESCE($2, room_number),
                    tipe = COALESCE($3, tipe),
                    harga = COALESCE($4, harga),
                    status = COALESCE($5, status),
                    room_picture = COALESCE($6, room_picture)
                WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .bind(event.room_number)
        .bind(event.tipe)
        .bind(event.harga)
        .bind(event.status.map(|s| s.to_string()))
        .bind(event.room_picture)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been updated".into(),
            ));
        }

        // 空室かどうかが変わったときだけカウンターを動かす
        if let Some(new_status) = event.status {
            let delta = match (old_status.is_available(), new_status.is_available()) {
                (true, false) => -1i32,
                (false, true) => 1i32,
                _ => 0,
            };
            if delta != 0 {
                sqlx::query(
                    "UPDATE kos SET available_rooms = available_rooms + $2 WHERE kos_id = $1",
                )
                .bind(state.kos_id)
                .bind(delta)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteRoom) -> AppResult<KosCounters> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let state = self.fetch_state(&mut tx, event.room_id).await?;

        if !event.access.can_manage_kos(state.owned_by) {
            return Err(AppError::ForbiddenOperation);
        }

        // アクティブな予約が残っている部屋は消せない
        let has_active_bookings = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM bookings
                    WHERE room_id = $1 AND status IN ('PENDING', 'CONFIRMED')
                )
            "#,
        )
        .bind(event.room_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if has_active_bookings {
            return Err(AppError::UnprocessableEntity(
                "Cannot delete room with active bookings. Please cancel or complete all bookings first."
                    .into(),
            ));
        }

        let old_status = RoomStatus::from_str(&state.status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;

        let res = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(event.room_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been deleted".into(),
            ));
        }

        let available_decrement = if old_status.is_available() { 1i32 } else { 0 };
        let counters = sqlx::query_as::<_, KosCountersRow>(
            r#"
                UPDATE kos
                SET total_rooms = total_rooms - 1, available_rooms = available_rooms - $2
                WHERE kos_id = $1
                RETURNING kos_id, name, total_rooms, available_rooms
            "#,
        )
        .bind(state.kos_id)
        .bind(available_decrement)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(counters.into())
    }
}

impl RoomRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    async fn fetch_state(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        room_id: RoomId,
    ) -> AppResult<RoomStateRow> {
        sqlx::query_as::<_, RoomStateRow>(
            r#"
                SELECT r.room_id, r.room_number, r.status, r.kos_id, k.owned_by
                FROM rooms AS r
                INNER JOIN kos AS k ON r.kos_id = k.kos_id
                WHERE r.room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("Room not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{
        counters_of, period, register_kos, register_room, register_user,
    };
    use crate::repository::booking::BookingRepositoryImpl;
    use kernel::model::{
        access::AccessControl, booking::event::CreateBooking, role::Role,
    };
    use kernel::repository::booking::BookingRepository;

    #[sqlx::test(migrations = "../migrations")]
    async fn counters_follow_room_lifecycle(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RoomRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let access = AccessControl::new(owner.user_id, Role::Owner);
        let kos_id = register_kos(&pool, &owner).await;
        assert_eq!(counters_of(&pool, kos_id).await, (0, 0));

        // 部屋を追加すると両カウンターが増える
        let room_id = register_room(&pool, kos_id, &owner, "A1", 900_000).await;
        assert_eq!(counters_of(&pool, kos_id).await, (1, 1));

        // メンテナンス中にすると空室だけ減る
        repo.update(UpdateRoom {
            room_id,
            room_number: None,
            tipe: None,
            harga: None,
            status: Some(RoomStatus::Maintenance),
            room_picture: None,
            access,
        })
        .await?;
        assert_eq!(counters_of(&pool, kos_id).await, (1, 0));

        // 削除で総数も戻る。メンテナンス中だったので空室は減らない
        let counters = repo.delete(DeleteRoom::new(room_id, access)).await?;
        assert_eq!(
            (counters.total_rooms, counters.available_rooms),
            (0, 0)
        );
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn duplicate_room_number_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RoomRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let access = AccessControl::new(owner.user_id, Role::Owner);
        let kos_id = register_kos(&pool, &owner).await;
        register_room(&pool, kos_id, &owner, "A1", 900_000).await;

        let res = repo
            .create(CreateRoom::new(
                kos_id,
                "A1".into(),
                "Single".into(),
                800_000,
                String::new(),
                access,
            ))
            .await;

        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        // 失敗した作成はカウンターを動かさない
        assert_eq!(counters_of(&pool, kos_id).await, (1, 1));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn room_with_active_booking_cannot_be_deleted(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RoomRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let renter = register_user(&pool, Role::Society).await;
        let access = AccessControl::new(owner.user_id, Role::Owner);
        let kos_id = register_kos(&pool, &owner).await;
        let room_id = register_room(&pool, kos_id, &owner, "A1", 900_000).await;

        BookingRepositoryImpl::new(pool.clone())
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-01", "2024-01-31"),
                String::new(),
            ))
            .await?;

        let res = repo.delete(DeleteRoom::new(room_id, access)).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        // 部屋もカウンターもそのまま
        assert!(repo.find_by_id(room_id).await?.is_some());
        assert_eq!(counters_of(&pool, kos_id).await, (1, 1));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn society_role_cannot_mutate_rooms(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RoomRepositoryImpl::new(pool.clone());
        let owner = register_user(&pool, Role::Owner).await;
        let renter = register_user(&pool, Role::Society).await;
        let kos_id = register_kos(&pool, &owner).await;

        let res = repo
            .create(CreateRoom::new(
                kos_id,
                "A1".into(),
                "Single".into(),
                900_000,
                String::new(),
                AccessControl::new(renter.user_id, Role::Society),
            ))
            .await;

        assert!(matches!(res, Err(AppError::ForbiddenOperation)));
        Ok(())
    }
}
