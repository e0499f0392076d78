use async_trait::async_trait;

use crate::{
    entities::profile::{Profile, ProfileData},
    entities::user::{User, UserUpsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Upserts the user (keyed on clerk_id) and its profile (keyed on
    /// user_id) as a single transaction. The profile write replaces every
    /// field; concurrent saves race on the store's upsert atomicity and the
    /// last write wins.
    async fn upsert_user_and_profile(
        &self,
        user: &UserUpsert,
        data: &ProfileData,
    ) -> Result<(User, Profile), AppError>;

    async fn find_user_with_profile(
        &self,
        clerk_id: &str,
    ) -> Result<Option<(User, Option<Profile>)>, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn upsert_user_and_profile(
        &self,
        user: &UserUpsert,
        data: &ProfileData,
    ) -> Result<(User, Profile), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let user_row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (clerk_id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (clerk_id) DO UPDATE
            SET email = EXCLUDED.email,
                name = EXCLUDED.name,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(&user.clerk_id)
        .bind(&user.email)
        .bind(&user.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from)?;

        let profile_row = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, profession, bio, skills, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET profession = EXCLUDED.profession,
                bio = EXCLUDED.bio,
                skills = EXCLUDED.skills,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_row.id)
        .bind(&data.profession)
        .bind(&data.bio)
        .bind(&data.skills)
        .bind(&data.avatar_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;

        Ok((user_row, profile_row))
    }

    async fn find_user_with_profile(
        &self,
        clerk_id: &str,
    ) -> Result<Option<(User, Option<Profile>)>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE clerk_id = $1")
            .bind(clerk_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        let Some(user) = user else {
            return Ok(None);
        };

        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(Some((user, profile)))
    }
}
