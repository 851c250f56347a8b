use crate::model::{id::KosId, user::KosOwner};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug)]
pub struct Kos {
    pub kos_id: KosId,
    pub name: String,
    pub alamat: String,
    pub description: String,
    pub peraturan_kos: String,
    pub gender_type: GenderType,
    // 以下 2 つは派生カウンター。部屋の作成・削除・状態変更時のみ更新される
    pub total_rooms: i32,
    pub available_rooms: i32,
    pub kos_picture: String,
    pub owner: KosOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GenderType {
    MaleOnly,
    FemaleOnly,
    Mixed,
}

// 部屋の増減後にレスポンスへ含めるカウンターのスナップショット
#[derive(Debug)]
pub struct KosCounters {
    pub kos_id: KosId,
    pub name: String,
    pub total_rooms: i32,
    pub available_rooms: i32,
}

// 一覧取得の絞り込み条件
#[derive(Debug, Default)]
pub struct KosSearch {
    pub keyword: Option<String>,
    pub gender_type: Option<GenderType>,
}
