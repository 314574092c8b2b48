//! YAML parameter-file loading.
//!
//! Parameter files follow the reference plugin's names:
//!
//! ```yaml
//! target_weight: 1.15
//! obstacle_weight: 1.5
//! desired_speed: 0.8
//! relaxation_time: 0.5
//! sensing_radius: 4.0
//! max_speed: 15.0
//! target_tolerance: 0.3
//! world_min: [-3.0, -10.0]
//! world_max: [3.5, 2.0]
//! ignore: [ground_plane]
//! ```
//!
//! Every field is optional; missing fields take the built-in defaults. The
//! loaded snapshot is validated before it is returned, so an engine is never
//! constructed from out-of-range parameters.

use std::path::Path;

use crate::engine::SocialForceConfig;
use crate::types::ForceError;

pub fn load_config(yaml_path: impl AsRef<Path>) -> Result<SocialForceConfig, ForceError> {
    let yaml_str = std::fs::read_to_string(yaml_path.as_ref())?;
    parse_config(&yaml_str)
}

pub fn parse_config(yaml_str: &str) -> Result<SocialForceConfig, ForceError> {
    let config: SocialForceConfig = serde_yaml::from_str(yaml_str)?;
    config.validate()?;
    Ok(config)
}
