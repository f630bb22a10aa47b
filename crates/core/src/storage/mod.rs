mod error;
mod fragment;
mod http_mapping;

pub use error::{EmoteErrorCode, EmoteRepositoryError};
pub use fragment::ScanFilterFragment;
pub use http_mapping::{emote_error_to_status_code, repository_error_to_status_code};
