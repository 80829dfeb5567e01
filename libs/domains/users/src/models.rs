use axum_helpers::IssuedToken;
use axum_helpers::validation::{EMAIL_RX, Validate, Validator, matches};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Argon2id PHC string
    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub password_hash: String,
    /// Starts at 1
    pub version: i32,
}

/// Who is making the request, set by the authenticate middleware.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }
}

/// Signup payload; absent fields are rule failures, not decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SignupInput {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "5550100100")]
    pub phone: Option<String>,
    #[schema(example = "correct horse battery")]
    pub password: Option<String>,
}

impl Validate for SignupInput {
    fn validate(&self, v: &mut Validator) {
        validate_name(v, "first_name", self.first_name.as_deref());
        validate_name(v, "last_name", self.last_name.as_deref());
        validate_email(v, self.email.as_deref());
        validate_phone(v, self.phone.as_deref());
        validate_password_plaintext(v, self.password.as_deref());
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginInput {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery")]
    pub password: Option<String>,
}

impl Validate for LoginInput {
    fn validate(&self, v: &mut Validator) {
        validate_email(v, self.email.as_deref());
        validate_password_plaintext(v, self.password.as_deref());
    }
}

pub fn validate_name(v: &mut Validator, key: &str, name: Option<&str>) {
    match name {
        None | Some("") => v.add_error(key, "must be provided"),
        Some(name) => v.check(name.len() <= 30, key, "must not be more than 30 bytes"),
    }
}

pub fn validate_email(v: &mut Validator, email: Option<&str>) {
    match email {
        None | Some("") => v.add_error("email", "must be provided"),
        Some(email) => v.check(
            matches(email, &EMAIL_RX),
            "email",
            "must be a valid email address",
        ),
    }
}

/// Exactly ten ASCII digits.
pub fn validate_phone(v: &mut Validator, phone: Option<&str>) {
    match phone {
        None | Some("") => v.add_error("phone", "must be provided"),
        Some(phone) => v.check(
            phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()),
            "phone",
            "must contain exactly 10 digits",
        ),
    }
}

/// Plaintext password bounds, in bytes.
pub fn validate_password_plaintext(v: &mut Validator, password: Option<&str>) {
    match password {
        None | Some("") => v.add_error("password", "must be provided"),
        Some(password) => {
            v.check(password.len() >= 8, "password", "must be at least 8 bytes long");
            v.check(
                password.len() <= 72,
                "password",
                "must not be more than 72 bytes long",
            );
        }
    }
}

/// Validated signup with the password already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenEnvelope {
    pub authentication_token: IssuedToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupInput {
        SignupInput {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("5550100100".into()),
            password: Some("correct horse".into()),
        }
    }

    fn errors(input: &impl Validate) -> axum_helpers::FieldErrors {
        let mut v = Validator::new();
        input.validate(&mut v);
        v.into_errors()
    }

    #[test]
    fn test_valid_signup() {
        assert!(errors(&valid_signup()).is_empty());
    }

    #[test]
    fn test_empty_signup_reports_every_field() {
        let errors = errors(&SignupInput::default());
        assert_eq!(errors.len(), 5);
        assert!(errors.values().all(|m| m == "must be provided"));
    }

    #[test]
    fn test_name_limit() {
        let mut input = valid_signup();
        input.last_name = Some("x".repeat(31));
        assert_eq!(errors(&input)["last_name"], "must not be more than 30 bytes");
    }

    #[test]
    fn test_email_format() {
        let mut input = valid_signup();
        input.email = Some("ada@".into());
        assert_eq!(errors(&input)["email"], "must be a valid email address");
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        for phone in ["555010010", "55501001000", "555-010-01", "555010010a"] {
            let mut input = valid_signup();
            input.phone = Some(phone.into());
            assert_eq!(
                errors(&input)["phone"],
                "must contain exactly 10 digits",
                "{phone}"
            );
        }
    }

    #[test]
    fn test_password_bounds() {
        let mut input = valid_signup();
        input.password = Some("short".into());
        assert_eq!(errors(&input)["password"], "must be at least 8 bytes long");

        input.password = Some("p".repeat(73));
        assert_eq!(errors(&input)["password"], "must not be more than 72 bytes long");

        input.password = Some("p".repeat(72));
        assert!(errors(&input).is_empty());
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            created_at: Utc::now(),
            first_name: Some("Ada".into()),
            last_name: None,
            email: Some("ada@example.com".into()),
            phone: None,
            password_hash: "$argon2id$secret".into(),
            version: 1,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["version"], 1);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = errors(&LoginInput::default());
        assert_eq!(errors["email"], "must be provided");
        assert_eq!(errors["password"], "must be provided");
    }
}
