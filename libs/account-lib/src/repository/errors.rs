#[derive(Debug)]
pub enum UserRepositoryError {
    LoginAlreadyUsed,
    EmailAlreadyUsed,
    NotFound,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRepositoryError::LoginAlreadyUsed => write!(f, "login already used"),
            UserRepositoryError::EmailAlreadyUsed => write!(f, "email already used"),
            UserRepositoryError::NotFound => write!(f, "not found"),
            UserRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for UserRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UserRepositoryError::LoginAlreadyUsed => None,
            UserRepositoryError::EmailAlreadyUsed => None,
            UserRepositoryError::NotFound => None,
            UserRepositoryError::Sqlx(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for UserRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = msg_lower.get(start..)?;
    let end = rest.find('\'')?;
    rest.get(..end).map(str::to_string)
}

pub fn map_sqlx_error(err: sqlx::Error) -> UserRepositoryError {
    const USER_LOGIN_UNIQUE: &str = "user_login_unique";
    const USER_EMAIL_UNIQUE: &str = "user_email_unique";

    if let sqlx::Error::Database(db_err) = &err {
        // MySQL reports "Duplicate entry '...' for key 'users.user_login_unique'"
        // with SQLSTATE 23000.
        let msg = db_err.message().to_lowercase();
        let is_duplicate_key = db_err.code().as_deref() == Some("23000")
            && msg.contains("duplicate entry")
            && msg.contains("for key");

        if is_duplicate_key {
            let key = extract_mysql_key_name(&msg).unwrap_or_default();

            if key.ends_with(USER_LOGIN_UNIQUE) || msg.contains(USER_LOGIN_UNIQUE) {
                return UserRepositoryError::LoginAlreadyUsed;
            }

            if key.ends_with(USER_EMAIL_UNIQUE) || msg.contains(USER_EMAIL_UNIQUE) {
                return UserRepositoryError::EmailAlreadyUsed;
            }
        }
    }

    UserRepositoryError::Sqlx(err)
}

#[cfg(test)]
mod tests {
    use super::extract_mysql_key_name;

    #[test]
    fn extracts_table_qualified_key_name() {
        let msg = "duplicate entry 'johndoe' for key 'users.user_login_unique'";
        assert_eq!(
            extract_mysql_key_name(msg).as_deref(),
            Some("users.user_login_unique")
        );
    }

    #[test]
    fn missing_marker_yields_none() {
        assert!(extract_mysql_key_name("deadlock found when trying to get lock").is_none());
    }
}
