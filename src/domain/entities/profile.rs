use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entities::user::User;

/// Public profile attached to a user. Exactly one per user, enforced by the
/// unique key on `user_id`; saves overwrite every field wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profession: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 100, message = "Profession must be 1-100 characters"))]
    pub profession: String,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[serde(default)]
    #[validate(
        length(max = 20, message = "At most 20 skills are allowed"),
        custom(function = "validate_skills", message = "Skills must be non-empty strings")
    )]
    pub skills: Vec<String>,

    #[validate(custom(function = "validate_avatar_url", message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,
}

impl ProfileForm {
    /// Normalizes the validated form for persistence: an empty avatar URL is
    /// treated as absent.
    pub fn into_data(self) -> ProfileData {
        ProfileData {
            profession: self.profession,
            bio: self.bio,
            skills: self.skills,
            avatar_url: self.avatar_url.filter(|url| !url.is_empty()),
        }
    }
}

/// Normalized profile fields handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub profession: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEnvelope {
    pub user: User,
    /// Absent until the first save; a valid state rendered with defaults.
    pub profile: Option<Profile>,
}

fn validate_skills(skills: &[String]) -> Result<(), ValidationError> {
    if skills.iter().any(|skill| skill.trim().is_empty()) {
        return Err(ValidationError::new("skill_empty"));
    }
    Ok(())
}

fn validate_avatar_url(value: &str) -> Result<(), ValidationError> {
    // Empty string is treated as "no avatar", not as a malformed URL.
    if value.is_empty() {
        return Ok(());
    }
    Url::parse(value).map(|_| ()).map_err(|_| ValidationError::new("url"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(profession: &str) -> ProfileForm {
        ProfileForm {
            profession: profession.to_string(),
            bio: None,
            skills: vec![],
            avatar_url: None,
        }
    }

    #[test]
    fn accepts_a_minimal_form() {
        assert!(form("Software Engineer").validate().is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_profession() {
        assert!(form("").validate().is_err());
        assert!(form(&"x".repeat(101)).validate().is_err());
        assert!(form(&"x".repeat(100)).validate().is_ok());
    }

    #[test]
    fn rejects_oversized_bio() {
        let mut f = form("Engineer");
        f.bio = Some("b".repeat(501));
        assert!(f.validate().is_err());
        f.bio = Some("b".repeat(500));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn rejects_more_than_twenty_skills() {
        let mut f = form("Engineer");
        f.skills = (0..21).map(|i| format!("skill-{i}")).collect();
        assert!(f.validate().is_err());
        f.skills.truncate(20);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn rejects_blank_skill_entries() {
        let mut f = form("Engineer");
        f.skills = vec!["Rust".to_string(), "  ".to_string()];
        assert!(f.validate().is_err());
    }

    #[test]
    fn avatar_url_may_be_empty_or_well_formed() {
        let mut f = form("Engineer");
        f.avatar_url = Some(String::new());
        assert!(f.validate().is_ok());

        f.avatar_url = Some("https://example.com/me.png".to_string());
        assert!(f.validate().is_ok());

        f.avatar_url = Some("not a url".to_string());
        assert!(f.validate().is_err());
    }

    #[test]
    fn empty_avatar_url_normalizes_to_absent() {
        let mut f = form("Engineer");
        f.avatar_url = Some(String::new());
        assert_eq!(f.into_data().avatar_url, None);
    }

    #[test]
    fn duplicate_skills_are_not_rejected_server_side() {
        // De-duplication happens at the UI layer; the server stores the list
        // as submitted.
        let mut f = form("Engineer");
        f.skills = vec!["Rust".to_string(), "Rust".to_string()];
        assert!(f.validate().is_ok());
        assert_eq!(f.into_data().skills.len(), 2);
    }
}
