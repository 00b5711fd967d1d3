pub mod factory;
pub mod http;
pub mod services;

pub use services::PluginServicesFactory;
