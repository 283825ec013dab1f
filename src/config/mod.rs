//! Configuration module for Oppsum.
//!
//! Settings come from a TOML file in the platform config directory; API
//! credentials come from the environment only and are loaded once at startup.

mod credentials;
mod settings;

pub use credentials::Credentials;
pub use settings::{
    CatalogSettings, GeneralSettings, NarrationSettings, Settings, SummarizerSettings,
    ThumbnailSettings,
};
