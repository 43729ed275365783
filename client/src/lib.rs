//! facegate client: wires the login flow to real infrastructure.
//!
//! [`ClientConfig`] is loaded from TOML, [`Kiosk`] turns it into a
//! verification client, a durable session store and the admin routing rule,
//! and hands out ready-to-run [`AuthFlow`](facegate_flow::AuthFlow)s.

pub mod config;
pub mod error;
pub mod kiosk;
pub mod logging;
pub mod navigator;

pub use config::ClientConfig;
pub use error::ClientError;
pub use kiosk::{Kiosk, KioskFlow};
pub use logging::{init_logging, LogFormat};
pub use navigator::PrintNavigator;
