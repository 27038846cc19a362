use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_USER: &str = "ROLE_USER";

pub const LOGIN_MAX_LENGTH: u64 = 50;
pub const PASSWORD_HASH_LENGTH: usize = 60;

/// Full user record as stored in the database.
///
/// This type is what the cache layer stores, so it keeps every column.
/// Nothing outside the crate should serialize it to API clients; use
/// [`PublicUser`] for that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub activated: bool,
    pub lang_key: Option<String>,
    pub activation_key: Option<String>,
    pub reset_key: Option<String>,
    pub authorities: Vec<String>,
}

/// Projection of a user that is safe to expose publicly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub login: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id,
            login: user.login.clone(),
        }
    }
}

/// Input for creating a user. The password must already be hashed.
#[derive(Debug, Validate)]
pub struct NewUser {
    #[validate(
        length(min = 1, max = 50, message = "login must be between 1 and 50 characters"),
        custom(function = "validate_login")
    )]
    pub login: String,
    pub password_hash: SecretString,
    #[validate(length(max = 50, message = "first name cannot exceed 50 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 50, message = "last name cannot exceed 50 characters"))]
    pub last_name: Option<String>,
    #[validate(
        email(message = "invalid email format"),
        length(min = 5, max = 254, message = "email must be between 5 and 254 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 256, message = "image url cannot exceed 256 characters"))]
    pub image_url: Option<String>,
    pub activated: bool,
    #[validate(length(min = 2, max = 10, message = "lang key must be between 2 and 10 characters"))]
    pub lang_key: Option<String>,
    pub authorities: Vec<String>,
}

impl NewUser {
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password_hash: SecretString::new(password_hash.into()),
            first_name: None,
            last_name: None,
            email: None,
            image_url: None,
            activated: false,
            lang_key: None,
            authorities: Vec::new(),
        }
    }

    pub fn password_hash_len(&self) -> usize {
        self.password_hash.expose_secret().len()
    }
}

const LOGIN_SIMPLE_CHARS: &str = "_.@-";
const LOGIN_MAIL_LOCAL_CHARS: &str = "!$&*+=?^_`{|}~.-";

/// Accepts either a plain login (`[_.@A-Za-z0-9-]+`) or an e-mail shaped one.
fn validate_login(login: &str) -> Result<(), ValidationError> {
    let simple = login
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || LOGIN_SIMPLE_CHARS.contains(c));

    let mail_like = login.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOGIN_MAIL_LOCAL_CHARS.contains(c))
            && domain.split('.').all(|label| {
                !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
    });

    if simple || mail_like {
        Ok(())
    } else {
        let mut err = ValidationError::new("login_pattern");
        err.message = Some("login contains invalid characters".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
        };
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
