use crate::{
    Exportable, Importable, Infoable, ObjectId, ObjectType,
    constants::ocel_gen_object::OcelGenObject,
    generation::attribute_synthesizer::AttributeMap,
    traits::importable::{ImporterParameter, ImporterParameterValues, from_string},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    io::BufRead,
};

pub const OCEL_VERSION: &str = "1.0";
pub const OCEL_ORDERING: &str = "timestamp";
pub const OCEL_FIXED_EVENT_ATTRIBUTE_NAMES: [&str; 2] = ["activity", "timestamp"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcelGlobalLog {
    #[serde(rename = "ocel:version")]
    pub version: String,
    #[serde(rename = "ocel:ordering")]
    pub ordering: String,
    #[serde(rename = "ocel:attribute-names")]
    pub attribute_names: Vec<String>,
    #[serde(rename = "ocel:global-attribute-names")]
    pub object_attribute_names: Vec<String>,
    #[serde(rename = "ocel:object-types")]
    pub object_types: Vec<ObjectType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcelEvent {
    #[serde(rename = "ocel:activity")]
    pub activity: String,
    #[serde(rename = "ocel:timestamp")]
    pub timestamp: String,
    #[serde(rename = "ocel:omap")]
    pub object_references: Vec<ObjectId>,
    #[serde(rename = "ocel:vmap", default, deserialize_with = "attribute_values")]
    pub attributes: AttributeMap,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcelObject {
    #[serde(rename = "ocel:type")]
    pub object_type: ObjectType,
    #[serde(rename = "ocel:ovmap", default, deserialize_with = "attribute_values")]
    pub attributes: AttributeMap,
}

/// Reads attribute values of any JSON type; non-string values keep their JSON rendering.
fn attribute_values<'de, D>(deserializer: D) -> std::result::Result<AttributeMap, D::Error>
where
    D: Deserializer<'de>,
{
    let values = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(value) => (key, value),
            value => (key, value.to_string()),
        })
        .collect())
}

/// An object-centric event log in the OCEL 1.0 JSON layout.
/// Events and objects are kept in the order in which they were generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectCentricEventLog {
    #[serde(rename = "ocel:global-log")]
    pub global_log: OcelGlobalLog,
    #[serde(rename = "ocel:global-event", default)]
    pub global_event: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "ocel:global-object", default)]
    pub global_object: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "ocel:events", with = "crate::ordered_map")]
    pub events: Vec<(String, OcelEvent)>,
    #[serde(rename = "ocel:objects", with = "crate::ordered_map")]
    pub objects: Vec<(ObjectId, OcelObject)>,
}

impl ObjectCentricEventLog {
    pub fn number_of_events(&self) -> usize {
        self.events.len()
    }

    pub fn number_of_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn get_event(&self, event_id: &str) -> Option<&OcelEvent> {
        self.events
            .iter()
            .find(|(id, _)| id == event_id)
            .map(|(_, event)| event)
    }

    pub fn get_object(&self, object_id: &str) -> Option<&OcelObject> {
        self.objects
            .iter()
            .find(|(id, _)| id == object_id)
            .map(|(_, object)| object)
    }

    pub fn objects_per_type(&self) -> BTreeMap<&str, usize> {
        let mut result = BTreeMap::new();
        for (_, object) in &self.objects {
            *result.entry(object.object_type.as_str()).or_insert(0) += 1;
        }
        result
    }

    /// Event attribute names as they appear on the events, plus the fixed names.
    pub fn observed_attribute_names(&self) -> BTreeSet<String> {
        self.events
            .iter()
            .flat_map(|(_, event)| event.attributes.keys().cloned())
            .chain(OCEL_FIXED_EVENT_ATTRIBUTE_NAMES.iter().map(|s| s.to_string()))
            .collect()
    }

    pub fn observed_object_attribute_names(&self) -> BTreeSet<String> {
        self.objects
            .iter()
            .flat_map(|(_, object)| object.attributes.keys().cloned())
            .collect()
    }
}

impl Importable for ObjectCentricEventLog {
    const IMPORTER_PARAMETERS: &[ImporterParameter] = &[];

    fn import_as_object(
        reader: &mut dyn BufRead,
        parameter_values: &ImporterParameterValues,
    ) -> Result<OcelGenObject> {
        Ok(OcelGenObject::ObjectCentricEventLog(Self::import(
            reader,
            parameter_values,
        )?))
    }

    fn import(reader: &mut dyn BufRead, _: &ImporterParameterValues) -> Result<Self>
    where
        Self: Sized,
    {
        serde_json::from_reader(reader).with_context(|| "cannot read OCEL JSON log")
    }
}
from_string!(ObjectCentricEventLog);

impl Exportable for ObjectCentricEventLog {
    fn export(&self, f: &mut dyn std::io::Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *f, self)?;
        Ok(writeln!(f)?)
    }
}

impl Display for ObjectCentricEventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "object-centric event log with {} events and {} objects",
            self.number_of_events(),
            self.number_of_objects()
        )
    }
}

impl Infoable for ObjectCentricEventLog {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        writeln!(f, "OCEL version\t{}", self.global_log.version)?;
        writeln!(f, "Number of events\t{}", self.number_of_events())?;
        writeln!(f, "Number of objects\t{}", self.number_of_objects())?;
        writeln!(
            f,
            "Number of object types\t{}",
            self.global_log.object_types.len()
        )?;

        let references = self
            .events
            .iter()
            .map(|(_, event)| event.object_references.len());
        writeln!(
            f,
            "Minimum number of objects per event\t{}",
            references
                .clone()
                .min()
                .map_or("n/a".to_string(), |l| l.to_string())
        )?;
        writeln!(
            f,
            "Maximum number of objects per event\t{}",
            references.max().map_or("n/a".to_string(), |l| l.to_string())
        )?;

        writeln!(f, "")?;
        writeln!(f, "Objects per type")?;
        for (object_type, count) in self.objects_per_type() {
            writeln!(f, "\t{}\t{}", object_type, count)?;
        }

        writeln!(f, "")?;
        writeln!(
            f,
            "Event attributes\n\t{}",
            self.global_log.attribute_names.join("\n\t")
        )?;

        writeln!(f, "")?;
        writeln!(
            f,
            "Object attributes\n\t{}",
            self.global_log.object_attribute_names.join("\n\t")
        )?;

        Ok(writeln!(f, "")?)
    }
}
