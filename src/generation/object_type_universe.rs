use anyhow::{Result, anyhow};
use rand::Rng;

use crate::{ObjectType, generation::triangular::TriangularRange};

pub const OBJECT_TYPE_PREFIX: &str = "ot";

/// The object types available in one run, fixed before the first case is processed.
/// The case type is kept apart and is never part of `types`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectTypeUniverse {
    types: Vec<ObjectType>,
    case_type: ObjectType,
}

impl ObjectTypeUniverse {
    pub fn new(count: usize, case_type: &str) -> Result<Self> {
        let types = (1..=count)
            .map(|i| format!("{}{}", OBJECT_TYPE_PREFIX, i))
            .collect::<Vec<_>>();
        if types.iter().any(|t| t == case_type) {
            return Err(anyhow!(
                "the case object type `{}` collides with a generated object type",
                case_type
            ));
        }
        Ok(Self {
            types,
            case_type: case_type.to_string(),
        })
    }

    /// Draws the number of object types once, rounded and clamped to at least one.
    pub fn sample<R: Rng + ?Sized>(
        range: &TriangularRange,
        case_type: &str,
        rng: &mut R,
    ) -> Result<Self> {
        range.validate("object_types")?;
        let count = range.sample_count(rng).max(1);
        log::info!("sampled {} object types", count);
        Self::new(count, case_type)
    }

    pub fn types(&self) -> &[ObjectType] {
        &self.types
    }

    pub fn case_type(&self) -> &str {
        &self.case_type
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::ObjectTypeUniverse;
    use crate::TriangularRange;

    #[test]
    fn universe_naming() {
        let universe = ObjectTypeUniverse::new(3, "ProcessCase").unwrap();
        assert_eq!(universe.types(), &["ot1", "ot2", "ot3"]);
        assert_eq!(universe.case_type(), "ProcessCase");
    }

    #[test]
    fn universe_at_least_one_type() {
        let mut rng = StdRng::seed_from_u64(42);
        let universe =
            ObjectTypeUniverse::sample(&TriangularRange::fixed(0.0), "case", &mut rng).unwrap();
        assert_eq!(universe.len(), 1);
    }

    #[test]
    fn universe_invalid_range() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(
            ObjectTypeUniverse::sample(&TriangularRange::new(5.0, 3.0, 1.0), "case", &mut rng)
                .is_err()
        );
    }

    #[test]
    fn universe_case_type_collision() {
        assert!(ObjectTypeUniverse::new(2, "ot2").is_err());
        assert!(ObjectTypeUniverse::new(1, "ot2").is_ok());
    }
}
