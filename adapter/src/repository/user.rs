use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{event::CreateUser, User},
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
        let duplicate = sqlx::query_scalar::<_, UserId>(
            r#"
                SELECT user_id FROM users WHERE user_name = $1
            "#,
        )
        .bind(&event.user_name)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if duplicate.is_some() {
            return Err(AppError::UnprocessableEntity(format!(
                "user name ({}) already exists",
                event.user_name
            )));
        }

        let user_id = UserId::new();
        let hashed_password = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;
        // Self-registration always produces a student; elevated roles are
        // granted out of band.
        let role = Role::Student;

        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, password_hash, role)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&hashed_password)
        .bind(role.as_str())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no user record has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            user_name: event.user_name,
            role,
        })
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, role
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../migrations")]
    async fn registered_user_is_a_student_by_default(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let created = repo
            .create(CreateUser::new("somchai".into(), "secret".into()))
            .await?;
        assert_eq!(created.role, Role::Student);

        let found = repo.find_current_user(created.user_id).await?.unwrap();
        assert_eq!(found, created);

        // The stored credential is a hash, never the raw password.
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE user_id = $1",
        )
        .bind(created.user_id)
        .fetch_one(&pool)
        .await?;
        assert_ne!(hash, "secret");
        assert!(bcrypt::verify("secret", &hash)?);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn duplicate_user_name_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(CreateUser::new("somchai".into(), "secret".into()))
            .await?;
        let res = repo
            .create(CreateUser::new("somchai".into(), "other".into()))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn unknown_user_is_none(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));
        assert!(repo.find_current_user(UserId::new()).await?.is_none());
        Ok(())
    }
}
