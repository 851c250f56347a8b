use crate::model::{id::UserId, role::Role};
use derive_new::new;

// ロールと所有関係から操作可否を判定する。
// ハンドラーごとに個別の条件分岐を書かず、判定はすべてここに集約する。
#[derive(Debug, Clone, Copy, new)]
pub struct AccessControl {
    caller: UserId,
    role: Role,
}

impl AccessControl {
    pub fn caller(&self) -> UserId {
        self.caller
    }

    pub fn role(&self) -> Role {
        self.role
    }

    // 予約の状態変更・削除：SOCIETY は自分の予約、OWNER は自分のコスへの予約のみ
    pub fn can_manage_booking(&self, renter: UserId, kos_owner: UserId) -> bool {
        match self.role {
            Role::Society => self.caller == renter,
            Role::Owner => self.caller == kos_owner,
        }
    }

    // 予約の当事者（予約者本人か、対象コスのオーナー）かどうか。
    // 予約詳細の閲覧と請求書の取得に使う
    pub fn is_booking_party(&self, renter: UserId, kos_owner: UserId) -> bool {
        self.caller == renter || self.caller == kos_owner
    }

    // コスとその配下（部屋・設備）の変更はコスのオーナー本人のみ
    pub fn can_manage_kos(&self, kos_owner: UserId) -> bool {
        matches!(self.role, Role::Owner) && self.caller == kos_owner
    }

    // レビュー削除は投稿者本人か対象コスのオーナー
    pub fn can_delete_review(&self, author: UserId, kos_owner: UserId) -> bool {
        self.caller == author || self.caller == kos_owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_is_managed_by_its_renter_or_the_kos_owner() {
        let renter = UserId::new();
        let kos_owner = UserId::new();
        let stranger = UserId::new();

        let as_renter = AccessControl::new(renter, Role::Society);
        let as_owner = AccessControl::new(kos_owner, Role::Owner);
        let as_other_renter = AccessControl::new(stranger, Role::Society);
        let as_other_owner = AccessControl::new(stranger, Role::Owner);

        assert!(as_renter.can_manage_booking(renter, kos_owner));
        assert!(as_owner.can_manage_booking(renter, kos_owner));
        assert!(!as_other_renter.can_manage_booking(renter, kos_owner));
        assert!(!as_other_owner.can_manage_booking(renter, kos_owner));
    }

    #[test]
    fn kos_mutation_requires_the_owning_owner() {
        let kos_owner = UserId::new();

        assert!(AccessControl::new(kos_owner, Role::Owner).can_manage_kos(kos_owner));
        // 本人でもロールが SOCIETY なら不可
        assert!(!AccessControl::new(kos_owner, Role::Society).can_manage_kos(kos_owner));
        assert!(!AccessControl::new(UserId::new(), Role::Owner).can_manage_kos(kos_owner));
    }

    #[test]
    fn review_is_deletable_by_author_or_kos_owner() {
        let author = UserId::new();
        let kos_owner = UserId::new();

        assert!(AccessControl::new(author, Role::Society).can_delete_review(author, kos_owner));
        assert!(AccessControl::new(kos_owner, Role::Owner).can_delete_review(author, kos_owner));
        assert!(
            !AccessControl::new(UserId::new(), Role::Society).can_delete_review(author, kos_owner)
        );
    }
}
