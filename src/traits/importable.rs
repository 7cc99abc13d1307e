use anyhow::Result;
use std::{collections::HashMap, hash::Hash, io::BufRead};
use strum_macros::Display;

use crate::constants::ocel_gen_object::OcelGenObject;

pub trait Importable {
    ///Defines the parameters that the importer expects.
    const IMPORTER_PARAMETERS: &[ImporterParameter];

    fn import_as_object(
        reader: &mut dyn BufRead,
        parameter_values: &ImporterParameterValues,
    ) -> Result<OcelGenObject>;

    ///Attempts to import from the reader.
    ///The parameter_values must contain a value for every parameter in `IMPORTER_PARAMETERS`.
    fn import(reader: &mut dyn BufRead, parameter_values: &ImporterParameterValues) -> Result<Self>
    where
        Self: Sized;

    fn default_importer_parameter_values() -> ImporterParameterValues {
        let mut result = HashMap::new();
        for parameter in Self::IMPORTER_PARAMETERS {
            result.insert(*parameter, parameter.default());
        }
        result
    }
}

macro_rules! from_string {
    ($t:ident) => {
        impl std::str::FromStr for $t {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut reader = std::io::Cursor::new(s);
                let default_parameter_values = $t::default_importer_parameter_values();
                Self::import(&mut reader, &default_parameter_values)
            }
        }
    };
}
pub(crate) use from_string;

pub type ImporterParameterValues = HashMap<ImporterParameter, ImporterParameterValue>;

/// Parameters that can be given to an importer.
/// Every parameter has a default, so that every importer works without user interaction.
#[derive(Copy, Clone, Debug, Display)]
pub enum ImporterParameter {
    String {
        name: &'static str,
        default_value: &'static str,
    },
}

impl ImporterParameter {
    pub fn name(&self) -> &'static str {
        match self {
            ImporterParameter::String { name, .. } => name,
        }
    }

    pub fn default(&self) -> ImporterParameterValue {
        match self {
            ImporterParameter::String { default_value, .. } => {
                ImporterParameterValue::String(default_value.to_string())
            }
        }
    }
}

impl Eq for ImporterParameter {}

impl PartialEq for ImporterParameter {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Hash for ImporterParameter {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name().hash(state)
    }
}

#[derive(Clone, Debug)]
pub enum ImporterParameterValue {
    String(String),
}

impl ImporterParameterValue {
    pub fn as_string(&self) -> Result<String> {
        match self {
            ImporterParameterValue::String(s) => Ok(s.clone()),
        }
    }
}
