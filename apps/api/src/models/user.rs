use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(format!("'{email}' is not a valid email address")),
    }
}

impl NewUser {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        validate_email(&self.email)?;
        crate::auth::password::validate_password(&self.password)
    }
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        if self.otp.trim().is_empty() {
            return Err("otp cannot be empty".to_string());
        }
        if self.new_password != self.confirm_password {
            return Err("new_password and confirm_password do not match".to_string());
        }
        crate::auth::password::validate_password(&self.new_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("dev@example.com").is_ok());
        assert!(validate_email("dev@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("dev.example.com").is_err());
    }

    #[test]
    fn test_new_user_requires_name_and_strong_enough_password() {
        let mut user = NewUser {
            name: "".to_string(),
            email: "dev@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(user.validate().is_err());

        user.name = "Dev".to_string();
        assert!(user.validate().is_ok());

        user.password = "short".to_string();
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_reset_requires_matching_passwords() {
        let request = ResetPasswordRequest {
            email: "dev@example.com".to_string(),
            otp: "123456".to_string(),
            new_password: "new-password-1".to_string(),
            confirm_password: "new-password-2".to_string(),
        };
        let err = request.validate().unwrap_err();
        assert!(err.contains("do not match"));
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            name: "Dev".to_string(),
            email: "dev@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "dev@example.com");
    }
}
