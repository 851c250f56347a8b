use crate::database::{
    model::booking::{BookingRow, BookingStateRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    access::AccessControl,
    booking::{
        self,
        event::{CreateBooking, DeleteBooking, IssueInvoice, UpdateBookingStatus},
        Booking, BookingStatus, StayPeriod,
    },
    id::{BookingId, RoomId},
    role::Role,
    room::RoomStatus,
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};
use std::str::FromStr;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

const BOOKING_SELECT: &str = r#"
    SELECT
        b.booking_id,
        b.booked_by,
        u.name AS user_name,
        u.email,
        u.phone_number,
        b.start_date,
        b.end_date,
        b.total_price,
        b.status,
        b.notes,
        b.invoice_number,
        b.invoice_pdf,
        b.created_at,
        r.room_id,
        r.room_number,
        r.tipe,
        r.harga,
        k.kos_id,
        k.name AS kos_name,
        k.alamat,
        k.owned_by
    FROM bookings AS b
    INNER JOIN users AS u ON b.booked_by = u.user_id
    INNER JOIN rooms AS r ON b.room_id = r.room_id
    INNER JOIN kos AS k ON r.kos_id = k.kos_id
"#;

// 重複条件は半開区間で判定する:
//     existing.start < new.end AND new.start < existing.end
// 前の予約の終了日と同じ日から始まる予約は重複にならない
const OVERLAP_SQL: &str = r#"
    SELECT booking_id
    FROM bookings
    WHERE room_id = $1
      AND status IN ('PENDING', 'CONFIRMED')
      AND start_date < $3
      AND $2 < end_date
    LIMIT 1
"#;

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let mut tx = self.db.begin().await?;

        // 空室確認と INSERT を同じ直列化可能トランザクションで行い、
        // 同時リクエストによる二重予約を防ぐ
        self.set_transaction_serializable(&mut tx).await?;

        // ① 部屋の存在確認 ＋ 空室状態チェック
        let room = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, harga FROM rooms WHERE room_id = $1",
        )
        .bind(event.room_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some((status, harga)) = room else {
            return Err(AppError::EntityNotFound("Room not found".into()));
        };

        let status = RoomStatus::from_str(&status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        if !status.is_available() {
            return Err(AppError::UnprocessableEntity(format!(
                "Room ({}) is not available",
                event.room_id
            )));
        }

        // ② 希望期間が既存のアクティブな予約と重なっていないか確認
        let overlap = sqlx::query_scalar::<_, BookingId>(OVERLAP_SQL)
            .bind(event.room_id)
            .bind(event.period.start_date())
            .bind(event.period.end_date())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if overlap.is_some() {
            return Err(AppError::UnprocessableEntity(
                "Room is already booked for the selected dates".into(),
            ));
        }

        // ③ 日割りで合計金額を出して PENDING で登録する
        let total_price = booking::total_price(harga, &event.period);
        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, room_id, booked_by, start_date, end_date, total_price, status, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking_id)
        .bind(event.room_id)
        .bind(event.booked_by)
        .bind(event.period.start_date())
        .bind(event.period.end_date())
        .bind(total_price)
        .bind(BookingStatus::Pending.to_string())
        .bind(&event.notes)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking_id)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let sql = format!("{BOOKING_SELECT} WHERE b.booking_id = $1");
        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(booking_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn find_all_for(&self, access: AccessControl) -> AppResult<Vec<Booking>> {
        // SOCIETY には自分の予約だけ、OWNER には自分のコスへの予約だけを見せる
        let sql = match access.role() {
            Role::Society => {
                format!("{BOOKING_SELECT} WHERE b.booked_by = $1 ORDER BY b.created_at DESC")
            }
            Role::Owner => {
                format!("{BOOKING_SELECT} WHERE k.owned_by = $1 ORDER BY b.created_at DESC")
            }
        };
        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(access.caller())
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let state = self.fetch_state(&mut tx, event.booking_id).await?;

        if !event
            .access
            .can_manage_booking(state.booked_by, state.owned_by)
        {
            return Err(AppError::ForbiddenOperation);
        }

        let current = BookingStatus::from_str(&state.status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        if !current.can_transition_to(event.new_status) {
            return Err(AppError::InvalidTransition(format!(
                "booking status cannot change from {current} to {}",
                event.new_status
            )));
        }

        let res = sqlx::query("UPDATE bookings SET status = $2 WHERE booking_id = $1")
            .bind(event.booking_id)
            .bind(event.new_status.to_string())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        match event.new_status {
            BookingStatus::Confirmed => self.occupy_room(&mut tx, &state).await?,
            BookingStatus::Cancelled | BookingStatus::Completed => {
                self.release_room_if_free(&mut tx, &state).await?
            }
            // 遷移表が PENDING への遷移を許さないのでここには来ない
            BookingStatus::Pending => {}
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteBooking) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let state = self.fetch_state(&mut tx, event.booking_id).await?;

        if !event
            .access
            .can_manage_booking(state.booked_by, state.owned_by)
        {
            return Err(AppError::ForbiddenOperation);
        }

        let current = BookingStatus::from_str(&state.status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;

        let res = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(event.booking_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been deleted".into(),
            ));
        }

        // アクティブな予約を消したときだけ部屋の解放を試みる
        if current.is_active() {
            self.release_room_if_free(&mut tx, &state).await?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn is_available(&self, room_id: RoomId, period: &StayPeriod) -> AppResult<bool> {
        let status = sqlx::query_scalar::<_, String>("SELECT status FROM rooms WHERE room_id = $1")
            .bind(room_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .ok_or_else(|| AppError::EntityNotFound("Room not found".into()))?;

        // 日付重複とは別の失敗として区別する
        let status = RoomStatus::from_str(&status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        if !status.is_available() {
            return Err(AppError::UnprocessableEntity(format!(
                "Room ({room_id}) is not available"
            )));
        }

        let overlap = sqlx::query_scalar::<_, BookingId>(OVERLAP_SQL)
            .bind(room_id)
            .bind(period.start_date())
            .bind(period.end_date())
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(overlap.is_none())
    }

    async fn issue_invoice_number(&self, event: IssueInvoice) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        let sql = format!("{BOOKING_SELECT} WHERE b.booking_id = $1");
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(event.booking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))?;
        let mut found = Booking::try_from(row)?;

        if !event
            .access
            .is_booking_party(found.booked_by, found.room.owned_by)
        {
            return Err(AppError::ForbiddenOperation);
        }

        // 初回のみ採番し、以降は同じ番号を返す
        if found.invoice_number.is_none() {
            let number = booking::invoice_number_for(found.booking_id, event.issued_on);
            let res = sqlx::query(
                "UPDATE bookings SET invoice_number = $2 WHERE booking_id = $1 AND invoice_number IS NULL",
            )
            .bind(event.booking_id)
            .bind(&number)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if res.rows_affected() < 1 {
                return Err(AppError::NoRowsAffectedError(
                    "No invoice number has been assigned".into(),
                ));
            }
            found.invoice_number = Some(number);
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(found)
    }

    async fn record_invoice_document(
        &self,
        booking_id: BookingId,
        document: &str,
    ) -> AppResult<()> {
        let res = sqlx::query("UPDATE bookings SET invoice_pdf = $2 WHERE booking_id = $1")
            .bind(booking_id)
            .bind(document)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified booking not found".into(),
            ));
        }

        Ok(())
    }
}

impl BookingRepositoryImpl {
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
        booking_id: BookingId,
    ) -> AppResult<BookingStateRow> {
        sqlx::query_as::<_, BookingStateRow>(
            r#"
                SELECT
                    b.booking_id,
                    b.booked_by,
                    b.status,
                    r.room_id,
                    r.status AS room_status,
                    k.kos_id,
                    k.owned_by
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                INNER JOIN kos AS k ON r.kos_id = k.kos_id
                WHERE b.booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))
    }

    // 部屋を OCCUPIED にし、空室だった場合のみコスのカウンターを減らす
    async fn occupy_room(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        state: &BookingStateRow,
    ) -> AppResult<()> {
        let was_available = RoomStatus::from_str(&state.room_status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?
            .is_available();

        sqlx::query("UPDATE rooms SET status = $2 WHERE room_id = $1")
            .bind(state.room_id)
            .bind(RoomStatus::Occupied.to_string())
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if was_available {
            sqlx::query("UPDATE kos SET available_rooms = available_rooms - 1 WHERE kos_id = $1")
                .bind(state.kos_id)
                .execute(&mut **tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        }

        Ok(())
    }

    // 他にアクティブな予約が残っていなければ部屋を空室に戻す。
    // メンテナンス中の部屋には触らない
    async fn release_room_if_free(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        state: &BookingStateRow,
    ) -> AppResult<()> {
        let other_active = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM bookings
                    WHERE room_id = $1
                      AND booking_id <> $2
                      AND status IN ('PENDING', 'CONFIRMED')
                )
            "#,
        )
        .bind(state.room_id)
        .bind(state.booking_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let room_status = RoomStatus::from_str(&state.room_status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;

        if !other_active && room_status == RoomStatus::Occupied {
            sqlx::query("UPDATE rooms SET status = $2 WHERE room_id = $1")
                .bind(state.room_id)
                .bind(RoomStatus::Available.to_string())
                .execute(&mut **tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

            sqlx::query("UPDATE kos SET available_rooms = available_rooms + 1 WHERE kos_id = $1")
                .bind(state.kos_id)
                .execute(&mut **tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{
        counters_of, period, register_kos, register_room, register_user, status_of,
    };
    use chrono::NaiveDate;

    async fn setup(
        pool: &ConnectionPool,
    ) -> (
        BookingRepositoryImpl,
        kernel::model::user::User,
        kernel::model::user::User,
        kernel::model::id::KosId,
        RoomId,
    ) {
        let owner = register_user(pool, Role::Owner).await;
        let renter = register_user(pool, Role::Society).await;
        let kos_id = register_kos(pool, &owner).await;
        let room_id = register_room(pool, kos_id, &owner, "A1", 900_000).await;
        (
            BookingRepositoryImpl::new(pool.clone()),
            owner,
            renter,
            kos_id,
            room_id,
        )
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn full_month_booking_is_priced_at_the_monthly_rate(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, _owner, renter, _kos_id, room_id) = setup(&pool).await;

        let booking_id = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-01", "2024-01-31"),
                "Booking untuk 1 bulan".into(),
            ))
            .await?;

        let booking = repo.find_by_id(booking_id).await?.unwrap();
        assert_eq!(booking.total_price, 900_000);
        assert_eq!(booking.status, BookingStatus::Pending);
        // CONFIRMED になるまで部屋は空室のまま
        assert_eq!(status_of(&pool, room_id).await, RoomStatus::Available);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn overlapping_booking_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, _owner, renter, _kos_id, room_id) = setup(&pool).await;

        repo.create(CreateBooking::new(
            room_id,
            renter.user_id,
            period("2024-01-01", "2024-01-31"),
            String::new(),
        ))
        .await?;

        // PENDING の予約とも重複は許されない
        let res = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-15", "2024-02-15"),
                String::new(),
            ))
            .await;

        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn back_to_back_bookings_do_not_conflict(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, _owner, renter, _kos_id, room_id) = setup(&pool).await;

        repo.create(CreateBooking::new(
            room_id,
            renter.user_id,
            period("2024-01-01", "2024-01-31"),
            String::new(),
        ))
        .await?;

        // 前の予約の終了日と同じ日から始まる予約は成立する（半開区間）
        let res = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-31", "2024-02-15"),
                String::new(),
            ))
            .await;

        assert!(res.is_ok());
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn confirm_occupies_and_cancel_releases_the_room(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, owner, renter, kos_id, room_id) = setup(&pool).await;
        let owner_access = AccessControl::new(owner.user_id, Role::Owner);

        let booking_id = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-01", "2024-01-31"),
                String::new(),
            ))
            .await?;

        repo.update_status(UpdateBookingStatus::new(
            booking_id,
            BookingStatus::Confirmed,
            owner_access,
        ))
        .await?;
        assert_eq!(status_of(&pool, room_id).await, RoomStatus::Occupied);
        assert_eq!(counters_of(&pool, kos_id).await, (1, 0));

        repo.update_status(UpdateBookingStatus::new(
            booking_id,
            BookingStatus::Cancelled,
            owner_access,
        ))
        .await?;
        assert_eq!(status_of(&pool, room_id).await, RoomStatus::Available);
        assert_eq!(counters_of(&pool, kos_id).await, (1, 1));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn cancel_keeps_the_room_occupied_while_another_active_booking_remains(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, owner, renter, _kos_id, room_id) = setup(&pool).await;
        let owner_access = AccessControl::new(owner.user_id, Role::Owner);

        let first = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-01", "2024-01-31"),
                String::new(),
            ))
            .await?;
        // 隣接する 2 件目の予約を入れてから 1 件目を確定する
        let second = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-31", "2024-02-29"),
                String::new(),
            ))
            .await?;

        repo.update_status(UpdateBookingStatus::new(
            first,
            BookingStatus::Confirmed,
            owner_access,
        ))
        .await?;

        // 2 件目がまだ PENDING なので部屋は解放されない
        repo.update_status(UpdateBookingStatus::new(
            first,
            BookingStatus::Cancelled,
            owner_access,
        ))
        .await?;
        assert_eq!(status_of(&pool, room_id).await, RoomStatus::Occupied);

        // 2 件目も取り消すと解放される
        repo.update_status(UpdateBookingStatus::new(
            second,
            BookingStatus::Cancelled,
            owner_access,
        ))
        .await?;
        assert_eq!(status_of(&pool, room_id).await, RoomStatus::Available);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn illegal_transitions_are_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, owner, renter, _kos_id, room_id) = setup(&pool).await;
        let owner_access = AccessControl::new(owner.user_id, Role::Owner);

        let booking_id = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-01", "2024-01-31"),
                String::new(),
            ))
            .await?;

        // PENDING -> COMPLETED は遷移表にない
        let res = repo
            .update_status(UpdateBookingStatus::new(
                booking_id,
                BookingStatus::Completed,
                owner_access,
            ))
            .await;
        assert!(matches!(res, Err(AppError::InvalidTransition(_))));

        repo.update_status(UpdateBookingStatus::new(
            booking_id,
            BookingStatus::Cancelled,
            owner_access,
        ))
        .await?;

        // 終端状態からはどこへも動けない
        let res = repo
            .update_status(UpdateBookingStatus::new(
                booking_id,
                BookingStatus::Confirmed,
                owner_access,
            ))
            .await;
        assert!(matches!(res, Err(AppError::InvalidTransition(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn unrelated_users_cannot_touch_the_booking(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, _owner, renter, _kos_id, room_id) = setup(&pool).await;
        let other_renter = register_user(&pool, Role::Society).await;
        let other_owner = register_user(&pool, Role::Owner).await;

        let booking_id = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-01", "2024-01-31"),
                String::new(),
            ))
            .await?;

        for access in [
            AccessControl::new(other_renter.user_id, Role::Society),
            AccessControl::new(other_owner.user_id, Role::Owner),
        ] {
            let res = repo
                .update_status(UpdateBookingStatus::new(
                    booking_id,
                    BookingStatus::Confirmed,
                    access,
                ))
                .await;
            assert!(matches!(res, Err(AppError::ForbiddenOperation)));

            let res = repo.delete(DeleteBooking::new(booking_id, access)).await;
            assert!(matches!(res, Err(AppError::ForbiddenOperation)));
        }
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn is_available_distinguishes_room_state_from_date_conflicts(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, owner, renter, _kos_id, room_id) = setup(&pool).await;

        // 予約が無ければ空いている
        assert!(repo
            .is_available(room_id, &period("2024-01-01", "2024-01-31"))
            .await?);

        repo.create(CreateBooking::new(
            room_id,
            renter.user_id,
            period("2024-01-01", "2024-01-31"),
            String::new(),
        ))
        .await?;

        // 重複期間は false、ずれた期間は true
        assert!(!repo
            .is_available(room_id, &period("2024-01-15", "2024-02-15"))
            .await?);
        assert!(repo
            .is_available(room_id, &period("2024-01-31", "2024-02-15"))
            .await?);

        // 存在しない部屋は NotFound
        let missing = repo
            .is_available(RoomId::new(), &period("2024-01-01", "2024-01-31"))
            .await;
        assert!(matches!(missing, Err(AppError::EntityNotFound(_))));

        // 空室でない部屋は日付重複とは別のエラー
        let booking_id = repo
            .find_all_for(AccessControl::new(renter.user_id, Role::Society))
            .await?
            .remove(0)
            .booking_id;
        repo.update_status(UpdateBookingStatus::new(
            booking_id,
            BookingStatus::Confirmed,
            AccessControl::new(owner.user_id, Role::Owner),
        ))
        .await?;
        let res = repo
            .is_available(room_id, &period("2024-06-01", "2024-06-30"))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn invoice_number_is_assigned_once(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let (repo, _owner, renter, _kos_id, room_id) = setup(&pool).await;
        let renter_access = AccessControl::new(renter.user_id, Role::Society);

        let booking_id = repo
            .create(CreateBooking::new(
                room_id,
                renter.user_id,
                period("2024-01-01", "2024-01-31"),
                String::new(),
            ))
            .await?;

        let issued_on = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let first = repo
            .issue_invoice_number(IssueInvoice::new(booking_id, renter_access, issued_on))
            .await?;
        let expected = format!("INV-20240305-{booking_id}");
        assert_eq!(first.invoice_number.as_deref(), Some(expected.as_str()));

        // 2 回目は日付が変わっても同じ番号のまま
        let later = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let second = repo
            .issue_invoice_number(IssueInvoice::new(booking_id, renter_access, later))
            .await?;
        assert_eq!(second.invoice_number.as_deref(), Some(expected.as_str()));
        Ok(())
    }
}
