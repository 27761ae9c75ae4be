mod category;
mod core;
mod loader;

pub use category::{
    default_enabled, default_max_score, default_weights, AggregationMode, CategoryConfig,
    GradingConfiguration,
};

pub use core::{GradingConfig, GradingScheme};

pub use loader::{
    directory_ancestors, find_config_file, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
