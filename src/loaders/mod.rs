pub mod yaml;

pub use yaml::load_config;
