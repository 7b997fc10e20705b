pub mod token;
pub mod user;

pub use token::PostgresRefreshTokenRepository;
pub use user::PostgresUserRepository;
