pub mod crypto;
pub mod repositories;
