const PREFIX: &str = "account-api";

pub const USERS_BY_LOGIN_CACHE: &str = "usersByLogin";
pub const USERS_BY_EMAIL_CACHE: &str = "usersByEmail";

pub fn user_by_login_key(login: &str) -> String {
    format!("{PREFIX}:{USERS_BY_LOGIN_CACHE}:{}", login.to_lowercase())
}

pub fn user_by_email_key(email: &str) -> String {
    format!("{PREFIX}:{USERS_BY_EMAIL_CACHE}:{}", email.to_lowercase())
}

pub fn users_by_login_pattern() -> String {
    format!("{PREFIX}:{USERS_BY_LOGIN_CACHE}:*")
}

pub fn users_by_email_pattern() -> String {
    format!("{PREFIX}:{USERS_BY_EMAIL_CACHE}:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_keys_are_case_insensitive() {
        assert_eq!(user_by_login_key("JohnDoe"), "account-api:usersByLogin:johndoe");
        assert_eq!(user_by_login_key("johndoe"), user_by_login_key("JOHNDOE"));
    }

    #[test]
    fn email_keys_live_in_their_own_cache() {
        assert_eq!(
            user_by_email_key("John@Example.com"),
            "account-api:usersByEmail:john@example.com"
        );
        assert_ne!(user_by_email_key("a"), user_by_login_key("a"));
    }

    #[test]
    fn patterns_cover_their_keys() {
        let pattern = users_by_login_pattern();
        assert!(user_by_login_key("x").starts_with(pattern.trim_end_matches('*')));
        let pattern = users_by_email_pattern();
        assert!(user_by_email_key("x").starts_with(pattern.trim_end_matches('*')));
    }
}
