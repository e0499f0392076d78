use validator::Validate;

use crate::{
    entities::profile::{ProfileEnvelope, ProfileForm},
    entities::session::SessionIdentity,
    entities::user::UserUpsert,
    errors::AppError,
    repositories::{identity::IdentityProvider, profile::ProfileRepository},
};

pub struct ProfileHandler<R, P>
where
    R: ProfileRepository,
    P: IdentityProvider,
{
    pub profile_repo: R,
    pub identity: P,
}

impl<R, P> ProfileHandler<R, P>
where
    R: ProfileRepository,
    P: IdentityProvider,
{
    pub fn new(profile_repo: R, identity: P) -> Self {
        ProfileHandler { profile_repo, identity }
    }

    /// Validates the form, refreshes name/email from the identity provider,
    /// then upserts User and Profile in one transaction. Saves overwrite the
    /// profile wholesale; there is no partial-field merge.
    pub async fn save_profile(
        &self,
        session: &SessionIdentity,
        form: ProfileForm,
    ) -> Result<ProfileEnvelope, AppError> {
        form.validate()?;

        let provider_user = self.identity.fetch_user(&session.clerk_id).await?;

        let upsert = UserUpsert {
            clerk_id: session.clerk_id.clone(),
            name: provider_user.display_name(),
            email: provider_user.primary_email(),
        };

        let (user, profile) = self
            .profile_repo
            .upsert_user_and_profile(&upsert, &form.into_data())
            .await?;

        Ok(ProfileEnvelope {
            user,
            profile: Some(profile),
        })
    }

    /// The caller's user joined with its optional profile. A missing Profile
    /// is a valid state; a missing User row is not.
    pub async fn get_profile(&self, session: &SessionIdentity) -> Result<ProfileEnvelope, AppError> {
        let (user, profile) = self
            .profile_repo
            .find_user_with_profile(&session.clerk_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(ProfileEnvelope { user, profile })
    }
}
