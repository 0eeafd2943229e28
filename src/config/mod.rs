pub mod preferences;
pub mod settings;

pub use preferences::Preferences;
pub use settings::AppConfig;
