pub mod errors;
pub mod share_links;

pub use errors::AppError;
pub use share_links::{UrlMode, to_direct_url};
