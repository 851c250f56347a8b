use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, DeleteUser, UpdateUser},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        // 重複時は一意制約違反を待たず、どちらが重複したか分かるメッセージを返す
        let existing = sqlx::query_as::<_, (String, String)>(
            r#"
                SELECT email, phone_number
                FROM users
                WHERE email = $1 OR phone_number = $2
                LIMIT 1
            "#,
        )
        .bind(&event.email)
        .bind(&event.phone_number)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if let Some((email, _)) = existing {
            let message = if email == event.email {
                "Email is already in use"
            } else {
                "Phone number is already in use"
            };
            return Err(AppError::UnprocessableEntity(message.into()));
        }

        let user_id = UserId::new();
        let password_hash = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;
        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, name, email, password_hash, role, phone_number, profile_picture)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(password_hash)
        .bind(event.role.to_string())
        .bind(&event.phone_number)
        .bind(&event.profile_picture)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            name: event.name,
            email: event.email,
            role: event.role,
            phone_number: event.phone_number,
            profile_picture: event.profile_picture,
        })
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email, role, phone_number, profile_picture
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email, role, phone_number, profile_picture
                FROM users
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    async fn update(&self, event: UpdateUser) -> AppResult<()> {
        // パスワードは指定されたときだけハッシュし直す
        let password_hash = event
            .password
            .map(|password| bcrypt::hash(password, bcrypt::DEFAULT_COST))
            .transpose()?;

        let res = sqlx::query(
            r#"
                UPDATE users
                SET
                    name = COALESCE($2, name),
                    email = COALESCE($3, email),
                    password_hash = COALESCE($4, password_hash),
                    phone_number = COALESCE($5, phone_number),
                    profile_picture = COALESCE($6, profile_picture)
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .bind(event.name)
        .bind(event.email)
        .bind(password_hash)
        .bind(event.phone_number)
        .bind(event.profile_picture)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified user not found".into()));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(event.user_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified user not found".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::register_user;
    use kernel::model::role::Role;

    #[sqlx::test(migrations = "../migrations")]
    async fn duplicate_email_is_rejected_with_a_clear_message(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = UserRepositoryImpl::new(pool.clone());
        let user = register_user(&pool, Role::Society).await;

        let res = repo
            .create(CreateUser::new(
                "someone else".into(),
                user.email.clone(),
                "Passw0rd!".into(),
                Role::Society,
                "081234567890".into(),
                String::new(),
            ))
            .await;

        assert!(matches!(
            res,
            Err(AppError::UnprocessableEntity(message)) if message == "Email is already in use"
        ));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn update_keeps_unspecified_fields(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = UserRepositoryImpl::new(pool.clone());
        let user = register_user(&pool, Role::Owner).await;

        repo.update(UpdateUser {
            user_id: user.user_id,
            name: Some("Budi Santoso".into()),
            email: None,
            password: None,
            phone_number: None,
            profile_picture: None,
        })
        .await?;

        let updated = repo.find_current_user(user.user_id).await?.unwrap();
        assert_eq!(updated.name, "Budi Santoso");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.phone_number, user.phone_number);
        Ok(())
    }
}
