pub mod app_config;
mod config;
pub mod record;
pub mod resolve;
pub mod variants;

pub use app_config::{AppConfig, ConfigError};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{DetailSource, ProductRecord, NO_SECONDARY_DETAILS, NO_VARIANT_INFO};
pub use resolve::{resolve_attribute, resolve_or_marker, AttributeSpec};
pub use variants::{parse_variants_text, VariantSelections};
