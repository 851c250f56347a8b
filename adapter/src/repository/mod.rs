pub mod auth;
pub mod booking;
pub mod facility;
pub mod health;
pub mod kos;
pub mod review;
pub mod room;
pub mod user;

// リポジトリーの統合テストで共通して使うデータ登録のヘルパー
#[cfg(test)]
pub(crate) mod test_support {
    use crate::database::ConnectionPool;
    use crate::repository::{
        kos::KosRepositoryImpl, room::RoomRepositoryImpl, user::UserRepositoryImpl,
    };
    use kernel::model::{
        access::AccessControl,
        booking::StayPeriod,
        id::{KosId, RoomId},
        kos::{event::CreateKos, GenderType},
        role::Role,
        room::{event::CreateRoom, RoomStatus},
        user::{event::CreateUser, User},
    };
    use kernel::repository::{kos::KosRepository, room::RoomRepository, user::UserRepository};

    pub(crate) async fn register_user(pool: &ConnectionPool, role: Role) -> User {
        let tag = uuid::Uuid::new_v4().simple().to_string();
        UserRepositoryImpl::new(pool.clone())
            .create(CreateUser::new(
                format!("user-{tag}"),
                format!("{tag}@example.com"),
                "Passw0rd!".into(),
                role,
                format!("08{}", &tag[..12]),
                String::new(),
            ))
            .await
            .unwrap()
    }

    pub(crate) async fn register_kos(pool: &ConnectionPool, owner: &User) -> KosId {
        KosRepositoryImpl::new(pool.clone())
            .create(CreateKos::new(
                "Kos Mawar".into(),
                "Jl. Melati No. 1".into(),
                String::new(),
                String::new(),
                GenderType::Mixed,
                String::new(),
                owner.user_id,
            ))
            .await
            .unwrap()
    }

    pub(crate) async fn register_room(
        pool: &ConnectionPool,
        kos_id: KosId,
        owner: &User,
        room_number: &str,
        harga: i64,
    ) -> RoomId {
        let access = AccessControl::new(owner.user_id, Role::Owner);
        let (room_id, _) = RoomRepositoryImpl::new(pool.clone())
            .create(CreateRoom::new(
                kos_id,
                room_number.into(),
                "Single".into(),
                harga,
                String::new(),
                access,
            ))
            .await
            .unwrap();
        room_id
    }

    pub(crate) async fn counters_of(pool: &ConnectionPool, kos_id: KosId) -> (i32, i32) {
        let kos = KosRepositoryImpl::new(pool.clone())
            .find_by_id(kos_id)
            .await
            .unwrap()
            .unwrap();
        (kos.total_rooms, kos.available_rooms)
    }

    pub(crate) async fn status_of(pool: &ConnectionPool, room_id: RoomId) -> RoomStatus {
        RoomRepositoryImpl::new(pool.clone())
            .find_by_id(room_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    pub(crate) fn period(start: &str, end: &str) -> StayPeriod {
        StayPeriod::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }
}
