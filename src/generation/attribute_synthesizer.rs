use rand::Rng;
use std::collections::BTreeMap;
use strum_macros::Display;

use crate::generation::triangular::TriangularRange;

pub const SYNTHETIC_VALUE_MIN: u32 = 1;
pub const SYNTHETIC_VALUE_MAX: u32 = 999;

pub type AttributeMap = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AttributeRole {
    Event,
    Object,
}

/// Produces `n` entries `{role}_attr{i}` => `{role}_val{k}`, with `k` uniform in [1, 999].
pub fn synthetic_attributes<R: Rng + ?Sized>(
    role: AttributeRole,
    count: usize,
    rng: &mut R,
) -> AttributeMap {
    (1..=count)
        .map(|i| {
            (
                format!("{}_attr{}", role, i),
                format!(
                    "{}_val{}",
                    role,
                    rng.gen_range(SYNTHETIC_VALUE_MIN..=SYNTHETIC_VALUE_MAX)
                ),
            )
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct AttributeSynthesizer {
    event_attributes: TriangularRange,
    object_attributes: TriangularRange,
}

impl AttributeSynthesizer {
    pub fn new(event_attributes: TriangularRange, object_attributes: TriangularRange) -> Self {
        Self {
            event_attributes,
            object_attributes,
        }
    }

    pub fn object_attributes<R: Rng + ?Sized>(&self, rng: &mut R) -> AttributeMap {
        let count = self.object_attributes.sample_count(rng);
        synthetic_attributes(AttributeRole::Object, count, rng)
    }

    /// Copies the source attributes whose keys are not reserved, then lays synthetic ones on top.
    /// On a key collision the synthetic value wins.
    pub fn event_attributes<'a, R: Rng + ?Sized>(
        &self,
        source_attributes: impl IntoIterator<Item = (&'a String, &'a String)>,
        reserved_keys: &[&str],
        rng: &mut R,
    ) -> AttributeMap {
        let mut result = source_attributes
            .into_iter()
            .filter(|(key, _)| !reserved_keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<AttributeMap>();

        let count = self.event_attributes.sample_count(rng);
        result.extend(synthetic_attributes(AttributeRole::Event, count, rng));
        result
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{AttributeRole, AttributeSynthesizer, synthetic_attributes};
    use crate::TriangularRange;

    #[test]
    fn synthetic_keys_and_values() {
        let mut rng = StdRng::seed_from_u64(9);
        let attributes = synthetic_attributes(AttributeRole::Object, 3, &mut rng);
        assert_eq!(
            attributes.keys().collect::<Vec<_>>(),
            vec!["object_attr1", "object_attr2", "object_attr3"]
        );
        for value in attributes.values() {
            let number = value
                .strip_prefix("object_val")
                .unwrap()
                .parse::<u32>()
                .unwrap();
            assert!((1..=999).contains(&number));
        }
    }

    #[test]
    fn synthetic_none() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(synthetic_attributes(AttributeRole::Event, 0, &mut rng).is_empty());
    }

    #[test]
    fn event_attributes_merge() {
        let mut rng = StdRng::seed_from_u64(9);
        let synthesizer =
            AttributeSynthesizer::new(TriangularRange::fixed(1.0), TriangularRange::fixed(0.0));
        let source = vec![
            ("concept:name".to_string(), "a".to_string()),
            ("time:timestamp".to_string(), "2024-01-01T00:00:00+00:00".to_string()),
            ("lifecycle:transition".to_string(), "complete".to_string()),
            ("org:resource".to_string(), "Pete".to_string()),
            ("event_attr1".to_string(), "from source".to_string()),
        ];
        let attributes = synthesizer.event_attributes(
            source.iter().map(|(k, v)| (k, v)),
            &["concept:name", "time:timestamp", "lifecycle:transition"],
            &mut rng,
        );

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes["org:resource"], "Pete");
        assert!(attributes["event_attr1"].starts_with("event_val"));
    }

    #[test]
    fn role_display() {
        assert_eq!(AttributeRole::Event.to_string(), "event");
        assert_eq!(AttributeRole::Object.to_string(), "object");
    }
}
