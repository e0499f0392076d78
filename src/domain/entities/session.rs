use serde::{Deserialize, Serialize};

/// The authenticated caller, established by the session middleware and passed
/// into handlers explicitly. Never read from ambient state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionIdentity {
    pub clerk_id: String,
}

/// Claims carried by the identity provider's session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
}

/// The provider's view of a user, fetched from its backend API on every
/// profile save so provider-side edits propagate on the next save.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<ProviderEmailAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEmailAddress {
    pub email_address: String,
}

impl ProviderUser {
    /// "First Last" when a first name exists, else the username, else
    /// "Anonymous".
    pub fn display_name(&self) -> String {
        match self.first_name.as_deref() {
            Some(first) if !first.is_empty() => {
                format!("{} {}", first, self.last_name.as_deref().unwrap_or(""))
                    .trim()
                    .to_string()
            }
            _ => self
                .username
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string()),
        }
    }

    pub fn primary_email(&self) -> String {
        self.email_addresses
            .first()
            .map(|entry| entry.email_address.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_user() -> ProviderUser {
        ProviderUser {
            id: "user_123".to_string(),
            ..ProviderUser::default()
        }
    }

    #[test]
    fn display_name_prefers_first_and_last() {
        let mut user = provider_user();
        user.first_name = Some("Ada".to_string());
        user.last_name = Some("Lovelace".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_trims_missing_last_name() {
        let mut user = provider_user();
        user.first_name = Some("Ada".to_string());
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn display_name_falls_back_to_username_then_anonymous() {
        let mut user = provider_user();
        user.username = Some("ada".to_string());
        assert_eq!(user.display_name(), "ada");

        user.username = None;
        assert_eq!(user.display_name(), "Anonymous");
    }

    #[test]
    fn primary_email_is_the_first_address_or_empty() {
        let mut user = provider_user();
        assert_eq!(user.primary_email(), "");

        user.email_addresses = vec![
            ProviderEmailAddress { email_address: "ada@example.com".to_string() },
            ProviderEmailAddress { email_address: "old@example.com".to_string() },
        ];
        assert_eq!(user.primary_email(), "ada@example.com");
    }
}
