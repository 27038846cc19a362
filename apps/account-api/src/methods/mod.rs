pub mod entities;
pub mod get_authorities;
pub mod get_public_users;
pub mod health_check;
pub mod pagination;
pub mod routes;
