//! User domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User domain entity
#[derive(Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// Don't expose hash in debug output
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl User {
    /// Whether `plain_text` matches this user's stored password hash.
    pub fn check_password(&self, plain_text: &str) -> bool {
        super::password::verify(plain_text, &self.password_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::password;

    fn user_with_password(plain: &str) -> User {
        User {
            id: 1,
            username: "me1".to_string(),
            password_hash: password::hash(plain).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_check_password() {
        let user = user_with_password("password");
        assert!(user.check_password("password"));
        assert!(!user.check_password("Password"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let user = user_with_password("password");
        let printed = format!("{:?}", user);
        assert!(printed.contains("[REDACTED]"));
        assert!(!printed.contains(&user.password_hash));
    }

    #[test]
    fn test_serialize_skips_hash() {
        let user = user_with_password("password");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "me1");
        assert!(json.get("password_hash").is_none());
    }
}
