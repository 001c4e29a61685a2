pub mod api;
pub mod bootstrap;
pub mod health;

pub use api::router;
pub use bootstrap::{bootstrap, bootstrap_with_config, Application, BootstrapError};
