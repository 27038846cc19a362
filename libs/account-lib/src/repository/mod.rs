pub mod user_repository;
pub mod authority_repository;
pub mod models;
pub mod errors;
pub mod traits;

pub use user_repository::UserRepository;
pub use authority_repository::AuthorityRepository;
pub use errors::UserRepositoryError;
