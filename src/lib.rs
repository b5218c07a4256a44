pub mod page;
pub mod resolver;
pub mod tables;
pub mod types;
pub mod web;
pub mod zipcode;

pub use page::{PageView, render_page};
pub use resolver::{resolve, zip_prefix};
pub use tables::{Directory, FALLBACK_URL};
pub use types::Resolution;
pub use web::build_app;
pub use zipcode::format_location;
