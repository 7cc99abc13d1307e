use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::generation::triangular::TriangularRange;

pub const DEFAULT_GLOBAL_SEED: u64 = 42;

fn default_global_seed() -> u64 {
    DEFAULT_GLOBAL_SEED
}

/// The parameters of the conversion into an object-centric event log.
/// Counts are drawn from triangular distributions given by their min, mode and max.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub object_types_min: f64,
    pub object_types_mode: f64,
    pub object_types_max: f64,

    pub object_types_per_event_min: f64,
    pub object_types_per_event_mode: f64,
    pub object_types_per_event_max: f64,

    pub objects_per_type_per_event_min: f64,
    pub objects_per_type_per_event_mode: f64,
    pub objects_per_type_per_event_max: f64,

    pub reuse_object_probability: f64,

    /// The reserved object type of the case objects.
    pub case_object_type: String,

    #[serde(default)]
    pub event_attributes_min: f64,
    #[serde(default)]
    pub event_attributes_mode: f64,
    #[serde(default)]
    pub event_attributes_max: f64,

    #[serde(default)]
    pub object_attributes_min: f64,
    #[serde(default)]
    pub object_attributes_mode: f64,
    #[serde(default)]
    pub object_attributes_max: f64,
}

impl GenerationParameters {
    pub fn object_types(&self) -> TriangularRange {
        TriangularRange::new(
            self.object_types_min,
            self.object_types_mode,
            self.object_types_max,
        )
    }

    pub fn object_types_per_event(&self) -> TriangularRange {
        TriangularRange::new(
            self.object_types_per_event_min,
            self.object_types_per_event_mode,
            self.object_types_per_event_max,
        )
    }

    pub fn objects_per_type_per_event(&self) -> TriangularRange {
        TriangularRange::new(
            self.objects_per_type_per_event_min,
            self.objects_per_type_per_event_mode,
            self.objects_per_type_per_event_max,
        )
    }

    pub fn event_attributes(&self) -> TriangularRange {
        TriangularRange::new(
            self.event_attributes_min,
            self.event_attributes_mode,
            self.event_attributes_max,
        )
    }

    pub fn object_attributes(&self) -> TriangularRange {
        TriangularRange::new(
            self.object_attributes_min,
            self.object_attributes_mode,
            self.object_attributes_max,
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.object_types().validate("object_types")?;
        self.object_types_per_event()
            .validate("object_types_per_event")?;
        self.objects_per_type_per_event()
            .validate("objects_per_type_per_event")?;
        self.event_attributes().validate("event_attributes")?;
        self.object_attributes().validate("object_attributes")?;

        if self.objects_per_type_per_event_min < 1.0 {
            return Err(anyhow!(
                "objects_per_type_per_event_min must be at least 1, found {}",
                self.objects_per_type_per_event_min
            ));
        }
        if !(0.0..=1.0).contains(&self.reuse_object_probability) {
            return Err(anyhow!(
                "reuse_object_probability must lie in [0, 1], found {}",
                self.reuse_object_probability
            ));
        }
        if self.case_object_type.is_empty() {
            return Err(anyhow!("case_object_type must not be empty"));
        }
        Ok(())
    }
}

/// A configuration file as read by the binary.
/// Unknown keys, such as the parameters of the process-tree simulation, are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub xes_log_path: Option<PathBuf>,
    pub output_ocel_path: PathBuf,
    #[serde(default = "default_global_seed")]
    pub global_seed: u64,
    pub ocel_generation_parameters: GenerationParameters,
}

impl GeneratorConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config = text
            .parse::<Self>()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

impl std::str::FromStr for GeneratorConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let config: Self = serde_json::from_str(s)?;
        config.ocel_generation_parameters.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{DEFAULT_GLOBAL_SEED, GeneratorConfig};

    #[test]
    fn config_read() {
        let fin = fs::read_to_string("testfiles/config.json").unwrap();
        let config = fin.parse::<GeneratorConfig>().unwrap();

        assert_eq!(config.global_seed, 192);
        let parameters = &config.ocel_generation_parameters;
        assert_eq!(parameters.case_object_type, "ProcessCase");
        assert_eq!(parameters.object_types().mode, 4.0);
        assert_eq!(parameters.reuse_object_probability, 0.3);
        assert_eq!(parameters.object_attributes().max, 3.0);
    }

    #[test]
    fn config_defaults() {
        let config = r#"{
            "output_ocel_path": "out/log.jsonocel",
            "ocel_generation_parameters": {
                "object_types_min": 1, "object_types_mode": 2, "object_types_max": 3,
                "object_types_per_event_min": 1, "object_types_per_event_mode": 1, "object_types_per_event_max": 2,
                "objects_per_type_per_event_min": 1, "objects_per_type_per_event_mode": 1, "objects_per_type_per_event_max": 1,
                "reuse_object_probability": 0.5,
                "case_object_type": "case"
            }
        }"#
        .parse::<GeneratorConfig>()
        .unwrap();

        assert_eq!(config.global_seed, DEFAULT_GLOBAL_SEED);
        assert_eq!(config.xes_log_path, None);
        assert_eq!(config.ocel_generation_parameters.event_attributes_max, 0.0);
    }

    #[test]
    fn config_missing_key() {
        let result = r#"{
            "output_ocel_path": "out/log.jsonocel",
            "ocel_generation_parameters": {
                "object_types_min": 1, "object_types_mode": 2,
                "object_types_per_event_min": 1, "object_types_per_event_mode": 1, "object_types_per_event_max": 2,
                "objects_per_type_per_event_min": 1, "objects_per_type_per_event_mode": 1, "objects_per_type_per_event_max": 1,
                "reuse_object_probability": 0.5,
                "case_object_type": "case"
            }
        }"#
        .parse::<GeneratorConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn config_invalid_values() {
        let fin = fs::read_to_string("testfiles/config.json").unwrap();
        let config = fin.parse::<GeneratorConfig>().unwrap();

        let mut parameters = config.ocel_generation_parameters.clone();
        parameters.object_types_min = 9.0;
        assert!(parameters.validate().is_err());

        let mut parameters = config.ocel_generation_parameters.clone();
        parameters.reuse_object_probability = 1.5;
        assert!(parameters.validate().is_err());

        let mut parameters = config.ocel_generation_parameters.clone();
        parameters.objects_per_type_per_event_min = 0.0;
        parameters.objects_per_type_per_event_mode = 0.0;
        assert!(parameters.validate().is_err());

        let mut parameters = config.ocel_generation_parameters.clone();
        parameters.event_attributes_max = 0.5;
        assert!(parameters.validate().is_err());

        let mut parameters = config.ocel_generation_parameters;
        parameters.objects_per_type_per_event_min = 1.5;
        parameters.objects_per_type_per_event_mode = 1.5;
        parameters.objects_per_type_per_event_max = 1.5;
        assert!(parameters.validate().is_err());
    }
}
