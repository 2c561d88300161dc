use crate::{
    database::{model::user::UserCredentialRow, ConnectionPool},
    redis::RedisClient,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::str::FromStr;
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

fn auth_key(token: &str) -> String {
    format!("auth:{token}")
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let value = self.kv.get(&auth_key(&access_token.0)).await?;
        value.map(|raw| UserId::from_str(&raw)).transpose()
    }

    async fn verify_user(&self, user_name: &str, password: &str) -> AppResult<UserId> {
        let credential = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, password_hash FROM users WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // Unknown user and wrong password are indistinguishable to the
        // caller.
        let Some(credential) = credential else {
            return Err(AppError::UnauthenticatedError);
        };
        if !bcrypt::verify(password, &credential.password_hash)? {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(credential.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.kv
            .set_with_ttl(&auth_key(&token), &event.user_id.to_string(), self.ttl)
            .await?;
        Ok(AccessToken(token))
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.kv.delete(&auth_key(&access_token.0)).await
    }
}
