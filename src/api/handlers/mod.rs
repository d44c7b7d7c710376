//! HTTP request handlers for API endpoints.

pub mod health;
pub mod index;
pub mod redirect;
pub mod shorten;
pub mod url_info;

pub use health::health_handler;
pub use index::api_index_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use url_info::url_info_handler;
