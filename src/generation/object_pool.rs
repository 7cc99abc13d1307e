use anyhow::{Result, anyhow};
use rand::Rng;
use std::collections::HashMap;

use crate::{ObjectId, ObjectType};

/// Result of asking a pool for an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolDraw {
    Reused(ObjectId),
    /// A fresh id was appended to the pool; the caller has to register the object.
    Created(ObjectId),
}

impl PoolDraw {
    pub fn id(&self) -> &ObjectId {
        match self {
            PoolDraw::Reused(id) | PoolDraw::Created(id) => id,
        }
    }

    pub fn into_id(self) -> ObjectId {
        match self {
            PoolDraw::Reused(id) | PoolDraw::Created(id) => id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, PoolDraw::Created(_))
    }
}

/// Decides whether a draw reuses a pooled object, and if so which one.
/// One uniform number is always consumed, then one index when reusing.
pub fn choose_reuse<R: Rng + ?Sized>(
    rng: &mut R,
    reuse_probability: f64,
    pool_size: usize,
) -> Option<usize> {
    let u: f64 = rng.r#gen();
    if u < reuse_probability && pool_size > 0 {
        Some(rng.gen_range(0..pool_size))
    } else {
        None
    }
}

pub fn format_object_id(object_type: &str, number: usize) -> ObjectId {
    format!("{}_{:04}", object_type, number)
}

/// Reuse pools, keyed by (case, object type), plus the per-type id counters of the run.
#[derive(Debug, Default)]
pub struct ObjectPoolManager {
    pools: HashMap<(String, ObjectType), Vec<ObjectId>>,
    counters: HashMap<ObjectType, usize>,
}

impl ObjectPoolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool for every object type and a singleton pool holding the case itself.
    pub fn start_case(&mut self, case_id: &str, case_type: &str, object_types: &[ObjectType]) {
        for object_type in object_types {
            self.pools
                .insert((case_id.to_string(), object_type.clone()), vec![]);
        }
        self.pools.insert(
            (case_id.to_string(), case_type.to_string()),
            vec![case_id.to_string()],
        );
    }

    /// Drops all pools of the case; pools never outlive their case.
    pub fn finish_case(&mut self, case_id: &str) {
        self.pools.retain(|(case, _), _| case != case_id);
    }

    pub fn pool(&self, case_id: &str, object_type: &str) -> Option<&Vec<ObjectId>> {
        self.pools
            .get(&(case_id.to_string(), object_type.to_string()))
    }

    /// Returns a pooled object with probability `reuse_probability` (if the pool has any),
    /// or creates a new one. Fresh ids for which `is_taken` holds are skipped.
    pub fn get_or_create<R: Rng + ?Sized>(
        &mut self,
        case_id: &str,
        object_type: &str,
        reuse_probability: f64,
        rng: &mut R,
        is_taken: impl Fn(&str) -> bool,
    ) -> Result<PoolDraw> {
        let pool = self
            .pools
            .get_mut(&(case_id.to_string(), object_type.to_string()))
            .ok_or_else(|| {
                anyhow!(
                    "no pool for object type `{}` in case `{}`",
                    object_type,
                    case_id
                )
            })?;

        if let Some(index) = choose_reuse(rng, reuse_probability, pool.len()) {
            return Ok(PoolDraw::Reused(pool[index].clone()));
        }

        let counter = self.counters.entry(object_type.to_string()).or_insert(0);
        let id = loop {
            *counter += 1;
            let candidate = format_object_id(object_type, *counter);
            if !is_taken(&candidate) {
                break candidate;
            }
        };
        pool.push(id.clone());
        Ok(PoolDraw::Created(id))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{ObjectPoolManager, PoolDraw, choose_reuse, format_object_id};

    fn types() -> Vec<String> {
        vec!["ot1".to_string(), "ot2".to_string()]
    }

    #[test]
    fn pool_case_start() {
        let mut pools = ObjectPoolManager::new();
        pools.start_case("c1", "case", &types());
        assert_eq!(pools.pool("c1", "case").unwrap(), &vec!["c1".to_string()]);
        assert!(pools.pool("c1", "ot1").unwrap().is_empty());
        assert!(pools.pool("c2", "ot1").is_none());

        pools.finish_case("c1");
        assert!(pools.pool("c1", "ot1").is_none());
    }

    #[test]
    fn pool_creates_when_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pools = ObjectPoolManager::new();
        pools.start_case("c1", "case", &types());

        let draw = pools
            .get_or_create("c1", "ot1", 1.0, &mut rng, |_| false)
            .unwrap();
        assert_eq!(draw, PoolDraw::Created("ot1_0001".to_string()));

        let draw = pools
            .get_or_create("c1", "ot1", 1.0, &mut rng, |_| false)
            .unwrap();
        assert_eq!(draw, PoolDraw::Reused("ot1_0001".to_string()));
    }

    #[test]
    fn pool_counters_are_global() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pools = ObjectPoolManager::new();
        pools.start_case("c1", "case", &types());
        pools.start_case("c2", "case", &types());

        let a = pools
            .get_or_create("c1", "ot1", 0.0, &mut rng, |_| false)
            .unwrap();
        let b = pools
            .get_or_create("c2", "ot1", 0.0, &mut rng, |_| false)
            .unwrap();
        assert_eq!(a.id(), "ot1_0001");
        assert_eq!(b.id(), "ot1_0002");
        assert!(b.is_created());

        //no cross-case sharing
        assert_eq!(pools.pool("c2", "ot1").unwrap(), &vec!["ot1_0002".to_string()]);
    }

    #[test]
    fn pool_skips_taken_ids() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pools = ObjectPoolManager::new();
        pools.start_case("c1", "case", &types());
        let draw = pools
            .get_or_create("c1", "ot2", 0.0, &mut rng, |id| id == "ot2_0001")
            .unwrap();
        assert_eq!(draw.into_id(), "ot2_0002");
    }

    #[test]
    fn pool_unknown_type() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pools = ObjectPoolManager::new();
        pools.start_case("c1", "case", &types());
        assert!(
            pools
                .get_or_create("c1", "ot9", 0.5, &mut rng, |_| false)
                .is_err()
        );
    }

    #[test]
    fn reuse_never_from_empty_pool() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            assert_eq!(choose_reuse(&mut rng, 1.0, 0), None);
        }
    }

    #[test]
    fn reuse_fraction_converges() {
        let mut rng = StdRng::seed_from_u64(2024);
        let draws = 100_000;
        for p in [0.1, 0.3, 0.75] {
            let reused = (0..draws)
                .filter(|_| choose_reuse(&mut rng, p, 10).is_some())
                .count();
            let fraction = reused as f64 / draws as f64;
            assert!((fraction - p).abs() < 0.01, "p {} fraction {}", p, fraction);
        }
    }

    #[test]
    fn object_id_format() {
        assert_eq!(format_object_id("ot3", 7), "ot3_0007");
        assert_eq!(format_object_id("ot3", 12345), "ot3_12345");
    }
}
