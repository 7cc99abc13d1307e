use crate::{
    Importable, Infoable,
    constants::ocel_gen_object::OcelGenObject,
    traits::importable::{
        ImporterParameter, ImporterParameterValue, ImporterParameterValues, from_string,
    },
};
use anyhow::{Result, anyhow};
use process_mining::{XESImportOptions, event_log::import_xes::import_xes};
use std::{fmt::Display, io::BufRead};

pub const DEFAULT_ACTIVITY_KEY: &str = "concept:name";
pub const CASE_ID_KEY: &str = "concept:name";
pub const TIMESTAMP_KEY: &str = "time:timestamp";
pub const LIFECYCLE_KEY: &str = "lifecycle:transition";

pub const CASE_LOG_IMPORTER_PARAMETER_ACTIVITY: ImporterParameter = ImporterParameter::String {
    name: "case_log_activity",
    default_value: DEFAULT_ACTIVITY_KEY,
};

/// One event of a case: its attributes, rendered as strings, in source order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CaseEvent {
    pub attributes: Vec<(String, String)>,
}

impl CaseEvent {
    pub fn new(attributes: Vec<(String, String)>) -> Self {
        Self { attributes }
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Case {
    pub id: Option<String>,
    pub events: Vec<CaseEvent>,
}

impl Case {
    pub fn new(id: Option<String>, events: Vec<CaseEvent>) -> Self {
        Self { id, events }
    }
}

/// A case-centric event log: cases in order, each an ordered sequence of events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseLog {
    pub activity_key: String,
    pub cases: Vec<Case>,
}

impl CaseLog {
    pub fn new(cases: Vec<Case>) -> Self {
        Self {
            activity_key: DEFAULT_ACTIVITY_KEY.to_string(),
            cases,
        }
    }

    pub fn with_activity_key(mut self, activity_key: &str) -> Self {
        self.activity_key = activity_key.to_string();
        self
    }

    pub fn number_of_cases(&self) -> usize {
        self.cases.len()
    }

    pub fn number_of_events(&self) -> usize {
        self.cases.iter().map(|case| case.events.len()).sum()
    }

    /// Importer parameter values that take activities from the event attribute `activity_key`.
    pub fn importer_parameter_values(activity_key: &str) -> ImporterParameterValues {
        let mut parameter_values = Self::default_importer_parameter_values();
        parameter_values.insert(
            CASE_LOG_IMPORTER_PARAMETER_ACTIVITY,
            ImporterParameterValue::String(activity_key.to_string()),
        );
        parameter_values
    }

    /// Attribute keys that are never copied onto generated events.
    pub fn reserved_keys(&self) -> [&str; 3] {
        [self.activity_key.as_str(), TIMESTAMP_KEY, LIFECYCLE_KEY]
    }
}

impl Importable for CaseLog {
    const IMPORTER_PARAMETERS: &[ImporterParameter] = &[CASE_LOG_IMPORTER_PARAMETER_ACTIVITY];

    fn import_as_object(
        reader: &mut dyn BufRead,
        parameter_values: &ImporterParameterValues,
    ) -> Result<OcelGenObject> {
        Ok(OcelGenObject::CaseLog(Self::import(
            reader,
            parameter_values,
        )?))
    }

    fn import(reader: &mut dyn BufRead, parameter_values: &ImporterParameterValues) -> Result<Self>
    where
        Self: Sized,
    {
        let log = match import_xes(reader, XESImportOptions::default()) {
            Ok(l) => l,
            Err(e) => return Err(anyhow!("cannot read XES log: {}", e)),
        };

        let activity_key = parameter_values
            .get(&CASE_LOG_IMPORTER_PARAMETER_ACTIVITY)
            .ok_or_else(|| anyhow!("expected parameter not found"))?
            .as_string()?;

        Ok(CaseLog::from(log).with_activity_key(&activity_key))
    }
}
from_string!(CaseLog);

impl Display for CaseLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "case log with {} cases", self.number_of_cases())
    }
}

impl Infoable for CaseLog {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        writeln!(f, "Number of cases\t{}", self.number_of_cases())?;
        writeln!(f, "Number of events\t{}", self.number_of_events())?;

        let lengths = self.cases.iter().map(|case| case.events.len());
        writeln!(
            f,
            "Minimum number of events per case\t{}",
            lengths
                .clone()
                .min()
                .map_or("n/a".to_string(), |l| l.to_string())
        )?;
        writeln!(
            f,
            "Maximum number of events per case\t{}",
            lengths.max().map_or("n/a".to_string(), |l| l.to_string())
        )?;

        Ok(writeln!(f, "")?)
    }
}
