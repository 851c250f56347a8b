use crate::model::id::{BookingId, KosId, RoomId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub period: StayPeriod,
    pub total_price: i64,
    pub status: BookingStatus,
    pub notes: String,
    pub invoice_number: Option<String>,
    pub invoice_pdf: Option<String>,
    pub created_at: DateTime<Utc>,
    pub room: BookingRoom,
}

// 予約レスポンスに含める、部屋とその親コスの情報
#[derive(Debug)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub room_number: String,
    pub tipe: String,
    pub harga: i64,
    pub kos_id: KosId,
    pub kos_name: String,
    pub alamat: String,
    pub owned_by: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    // PENDING と CONFIRMED が空室判定の対象になる
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    // 許可される遷移:
    //   PENDING   -> CONFIRMED | CANCELLED
    //   CONFIRMED -> CANCELLED | COMPLETED
    // CANCELLED と COMPLETED は終端
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
        )
    }
}

// 滞在期間。end_date は排他的で、必ず start_date より後
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl StayPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<Self> {
        if end_date <= start_date {
            return Err(AppError::UnprocessableEntity(
                "end_date must be after start_date".into(),
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    // 半開区間 [start, end) 同士の交差判定。
    // 端が一致するだけ（前の予約の終了日 = 次の予約の開始日）の場合は交差しない。
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }
}

// 月額料金からの日割り計算。日額は実数で割ってから切り上げる
pub fn total_price(harga: i64, period: &StayPeriod) -> i64 {
    let daily_rate = harga as f64 / 30.0;
    (daily_rate * period.days() as f64).ceil() as i64
}

pub fn invoice_number_for(booking_id: BookingId, issued_on: NaiveDate) -> String {
    format!("INV-{}-{}", issued_on.format("%Y%m%d"), booking_id)
}

// 請求書ドキュメントの保存先への参照
#[derive(Debug)]
pub struct DocumentRef(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(s: (i32, u32, u32), e: (i32, u32, u32)) -> StayPeriod {
        StayPeriod::new(date(s.0, s.1, s.2), date(e.0, e.1, e.2)).unwrap()
    }

    #[test]
    fn stay_period_rejects_empty_or_reversed_ranges() {
        assert!(StayPeriod::new(date(2024, 1, 1), date(2024, 1, 1)).is_err());
        assert!(StayPeriod::new(date(2024, 1, 2), date(2024, 1, 1)).is_err());
    }

    #[rstest]
    // 前後にずれた期間は交差しない
    #[case(period((2024, 1, 1), (2024, 1, 10)), period((2024, 2, 1), (2024, 2, 10)), false)]
    // 終了日と開始日が一致するだけなら交差しない（半開区間）
    #[case(period((2024, 1, 1), (2024, 1, 15)), period((2024, 1, 15), (2024, 2, 1)), false)]
    #[case(period((2024, 1, 15), (2024, 2, 1)), period((2024, 1, 1), (2024, 1, 15)), false)]
    // 一日でも重なれば交差
    #[case(period((2024, 1, 1), (2024, 1, 16)), period((2024, 1, 15), (2024, 2, 1)), true)]
    // 包含も交差
    #[case(period((2024, 1, 1), (2024, 2, 1)), period((2024, 1, 10), (2024, 1, 20)), true)]
    // 同一期間
    #[case(period((2024, 1, 1), (2024, 2, 1)), period((2024, 1, 1), (2024, 2, 1)), true)]
    fn overlap_uses_half_open_semantics(
        #[case] a: StayPeriod,
        #[case] b: StayPeriod,
        #[case] expected: bool,
    ) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[rstest]
    // 900000/月 で 30 日間はちょうど月額
    #[case(900_000, (2024, 1, 1), (2024, 1, 31), 900_000)]
    // 1 日だけでも日割りで課金される
    #[case(900_000, (2024, 1, 1), (2024, 1, 2), 30_000)]
    // 割り切れない月額は切り上げ（100000/30 = 3333.33... -> 3334)
    #[case(100_000, (2024, 1, 1), (2024, 1, 2), 3_334)]
    // 31 日間は月額を超える
    #[case(900_000, (2024, 1, 1), (2024, 2, 1), 930_000)]
    fn total_price_prorates_and_rounds_up(
        #[case] harga: i64,
        #[case] start: (i32, u32, u32),
        #[case] end: (i32, u32, u32),
        #[case] expected: i64,
    ) {
        assert_eq!(total_price(harga, &period(start, end)), expected);
    }

    #[test]
    fn total_price_is_monotonic_in_duration() {
        let harga = 750_000;
        let start = date(2024, 3, 1);
        let mut last = 0;
        for extra in 1..120 {
            let p = StayPeriod::new(start, start + chrono::Duration::days(extra)).unwrap();
            let price = total_price(harga, &p);
            assert!(price >= last);
            last = price;
        }
    }

    #[rstest]
    #[case(BookingStatus::Pending, BookingStatus::Confirmed, true)]
    #[case(BookingStatus::Pending, BookingStatus::Cancelled, true)]
    #[case(BookingStatus::Pending, BookingStatus::Completed, false)]
    #[case(BookingStatus::Confirmed, BookingStatus::Cancelled, true)]
    #[case(BookingStatus::Confirmed, BookingStatus::Completed, true)]
    #[case(BookingStatus::Confirmed, BookingStatus::Pending, false)]
    #[case(BookingStatus::Cancelled, BookingStatus::Pending, false)]
    #[case(BookingStatus::Cancelled, BookingStatus::Confirmed, false)]
    #[case(BookingStatus::Completed, BookingStatus::Pending, false)]
    #[case(BookingStatus::Completed, BookingStatus::Cancelled, false)]
    fn transition_table_is_enforced(
        #[case] from: BookingStatus,
        #[case] to: BookingStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn invoice_number_embeds_issue_date_and_booking_id() {
        let id = BookingId::new();
        let number = invoice_number_for(id, date(2024, 3, 5));
        assert_eq!(number, format!("INV-20240305-{id}"));
    }
}
