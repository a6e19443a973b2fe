//! Configuration module

mod site;

pub use site::ApiConfig;
pub use site::DefaultsConfig;
pub use site::SiteConfig;
