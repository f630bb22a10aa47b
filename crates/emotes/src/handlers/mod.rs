pub mod emotes;
pub mod error;
pub mod health;

pub use error::AppError;
