use crate::model::{
    access::AccessControl,
    id::{KosId, UserId},
    kos::GenderType,
};
use derive_new::new;

#[derive(new)]
pub struct CreateKos {
    pub name: String,
    pub alamat: String,
    pub description: String,
    pub peraturan_kos: String,
    pub gender_type: GenderType,
    pub kos_picture: String,
    pub owned_by: UserId,
}

pub struct UpdateKos {
    pub kos_id: KosId,
    pub name: Option<String>,
    pub alamat: Option<String>,
    pub description: Option<String>,
    pub peraturan_kos: Option<String>,
    pub gender_type: Option<GenderType>,
    pub kos_picture: Option<String>,
    pub access: AccessControl,
}

#[derive(new)]
pub struct DeleteKos {
    pub kos_id: KosId,
    pub access: AccessControl,
}
