use anyhow::Result;
use rand::{Rng, seq::index};

use crate::{
    ObjectId, ObjectType,
    generation::{
        attribute_synthesizer::{AttributeMap, AttributeSynthesizer},
        object_pool::{ObjectPoolManager, PoolDraw},
        object_type_universe::ObjectTypeUniverse,
        triangular::TriangularRange,
    },
};

/// Receives the objects created while relationships are assigned.
pub trait ObjectRegistry {
    fn is_registered(&self, object_id: &str) -> bool;

    fn register_object(
        &mut self,
        object_id: ObjectId,
        object_type: ObjectType,
        attributes: AttributeMap,
    ) -> Result<()>;
}

/// The objects one event refers to, grouped by type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRelationships {
    pub case_object: ObjectId,
    pub per_type: Vec<(ObjectType, Vec<ObjectId>)>,
}

impl EventRelationships {
    /// The case object first, then every type's objects in selection order, without duplicates.
    /// The grouping by type does not survive this.
    pub fn flatten(&self) -> Vec<ObjectId> {
        flatten_object_references(&self.case_object, &self.per_type)
    }
}

/// Removes repeated ids, keeping the first occurrence of each.
pub fn collect_unique(ids: impl IntoIterator<Item = ObjectId>) -> Vec<ObjectId> {
    let mut result: Vec<ObjectId> = vec![];
    for id in ids {
        if !result.contains(&id) {
            result.push(id);
        }
    }
    result
}

pub fn flatten_object_references(
    case_object: &ObjectId,
    per_type: &[(ObjectType, Vec<ObjectId>)],
) -> Vec<ObjectId> {
    collect_unique(
        std::iter::once(case_object.clone())
            .chain(per_type.iter().flat_map(|(_, ids)| ids.iter().cloned())),
    )
}

/// Draws how many types take part in an event (capped at the universe size) and picks them
/// uniformly without replacement.
pub fn select_object_types<R: Rng + ?Sized>(
    universe: &ObjectTypeUniverse,
    types_per_event: &TriangularRange,
    rng: &mut R,
) -> Vec<ObjectType> {
    let available = universe.len();
    let count = types_per_event
        .capped_at(available as f64)
        .sample_count(rng)
        .min(available);
    if count == 0 {
        return vec![];
    }
    index::sample(rng, available, count)
        .iter()
        .map(|i| universe.types()[i].clone())
        .collect()
}

#[derive(Clone, Debug)]
pub struct RelationshipAssigner {
    pub types_per_event: TriangularRange,
    pub objects_per_type: TriangularRange,
    pub reuse_probability: f64,
}

impl RelationshipAssigner {
    pub fn new(
        types_per_event: TriangularRange,
        objects_per_type: TriangularRange,
        reuse_probability: f64,
    ) -> Self {
        Self {
            types_per_event,
            objects_per_type,
            reuse_probability,
        }
    }

    pub fn assign<R: Rng + ?Sized>(
        &self,
        case_id: &str,
        universe: &ObjectTypeUniverse,
        pools: &mut ObjectPoolManager,
        synthesizer: &AttributeSynthesizer,
        registry: &mut impl ObjectRegistry,
        rng: &mut R,
    ) -> Result<EventRelationships> {
        let selected_types = select_object_types(universe, &self.types_per_event, rng);

        let mut per_type = Vec::with_capacity(selected_types.len());
        for object_type in selected_types {
            let number_of_objects = self.objects_per_type.sample_count(rng);

            let mut draws = Vec::with_capacity(number_of_objects);
            for _ in 0..number_of_objects {
                let draw = pools.get_or_create(
                    case_id,
                    &object_type,
                    self.reuse_probability,
                    rng,
                    |id| registry.is_registered(id),
                )?;
                if let PoolDraw::Created(id) = &draw {
                    let attributes = synthesizer.object_attributes(rng);
                    registry.register_object(id.clone(), object_type.clone(), attributes)?;
                }
                draws.push(draw.into_id());
            }

            //a repeated reuse draw lowers the count for this event; it is not drawn again
            let ids = collect_unique(draws);
            if !ids.is_empty() {
                per_type.push((object_type, ids));
            }
        }

        Ok(EventRelationships {
            case_object: case_id.to_string(),
            per_type,
        })
    }
}
