use serde::{Deserialize, Serialize};

/// The signed-in principal, as supplied by the identity collaborator.
///
/// The cart and pricing code only ever look at `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl AppUser {
    /// Creates a new AppUser with no avatar.
    ///
    /// # Arguments
    /// * `id` - Stable identifier issued by the identity provider
    /// * `email` - Sign-in email
    /// * `name` - Display name
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            avatar: None,
        }
    }

    /// The avatar URL, or a placeholder showing the first letter of the name.
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(url) => url.clone(),
            None => {
                let initial = self.name.chars().next().unwrap_or('U');
                format!("/placeholder.svg?height=40&width=40&text={initial}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_placeholder_uses_initial() {
        let user = AppUser::new("u1", "ada@example.com", "Ada");
        assert_eq!(user.avatar_url(), "/placeholder.svg?height=40&width=40&text=A");
    }

    #[test]
    fn test_avatar_placeholder_for_blank_name() {
        let user = AppUser::new("u1", "anon@example.com", "");
        assert!(user.avatar_url().ends_with("text=U"));
    }
}
