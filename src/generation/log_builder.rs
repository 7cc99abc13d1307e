use anyhow::{Result, anyhow};
use std::collections::{BTreeSet, HashSet};

use crate::{
    ObjectCentricEventLog, ObjectId, ObjectType, OcelEvent, OcelGlobalLog, OcelObject,
    generation::{attribute_synthesizer::AttributeMap, relationship_assigner::ObjectRegistry},
    objects::object_centric_event_log::{
        OCEL_FIXED_EVENT_ATTRIBUTE_NAMES, OCEL_ORDERING, OCEL_VERSION,
    },
};

/// Collects events and objects while cases are processed.
/// `finalize` consumes the builder; a finalised log cannot be extended.
#[derive(Debug, Default)]
pub struct OcelLogBuilder {
    events: Vec<(String, OcelEvent)>,
    objects: Vec<(ObjectId, OcelObject)>,
    object_ids: HashSet<ObjectId>,
    event_attribute_names: BTreeSet<String>,
    object_attribute_names: BTreeSet<String>,
    next_event_number: usize,
}

impl OcelLogBuilder {
    pub fn new() -> Self {
        Self {
            next_event_number: 1,
            ..Default::default()
        }
    }

    pub fn number_of_events(&self) -> usize {
        self.events.len()
    }

    pub fn number_of_objects(&self) -> usize {
        self.objects.len()
    }

    /// Appends an event under the next id of the run (`e1`, `e2`, ...) and returns that id.
    pub fn add_event(
        &mut self,
        activity: String,
        timestamp: String,
        object_references: Vec<ObjectId>,
        attributes: AttributeMap,
    ) -> String {
        let event_id = format!("e{}", self.next_event_number);
        self.next_event_number += 1;

        self.event_attribute_names
            .extend(attributes.keys().cloned());
        self.events.push((
            event_id.clone(),
            OcelEvent {
                activity,
                timestamp,
                object_references,
                attributes,
            },
        ));
        event_id
    }

    pub fn finalize(self) -> ObjectCentricEventLog {
        let object_types = self
            .objects
            .iter()
            .map(|(_, object)| object.object_type.clone())
            .collect::<BTreeSet<_>>();

        let attribute_names = self
            .event_attribute_names
            .into_iter()
            .chain(OCEL_FIXED_EVENT_ATTRIBUTE_NAMES.iter().map(|s| s.to_string()))
            .collect::<BTreeSet<_>>();

        ObjectCentricEventLog {
            global_log: OcelGlobalLog {
                version: OCEL_VERSION.to_string(),
                ordering: OCEL_ORDERING.to_string(),
                attribute_names: attribute_names.into_iter().collect(),
                object_attribute_names: self.object_attribute_names.into_iter().collect(),
                object_types: object_types.into_iter().collect(),
            },
            global_event: Default::default(),
            global_object: Default::default(),
            events: self.events,
            objects: self.objects,
        }
    }
}

impl ObjectRegistry for OcelLogBuilder {
    fn is_registered(&self, object_id: &str) -> bool {
        self.object_ids.contains(object_id)
    }

    fn register_object(
        &mut self,
        object_id: ObjectId,
        object_type: ObjectType,
        attributes: AttributeMap,
    ) -> Result<()> {
        if !self.object_ids.insert(object_id.clone()) {
            return Err(anyhow!("object `{}` is already registered", object_id));
        }
        self.object_attribute_names
            .extend(attributes.keys().cloned());
        self.objects.push((
            object_id,
            OcelObject {
                object_type,
                attributes,
            },
        ));
        Ok(())
    }
}
