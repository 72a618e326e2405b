pub mod config;
pub mod domain;
pub mod inbound;
pub mod logging;
pub mod outbound;

pub use domain::user;
pub use outbound::repositories;
