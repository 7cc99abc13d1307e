use anyhow::{Error, Result};
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Case, CaseLog, GenerationParameters, ObjectCentricEventLog,
    generation::{
        attribute_synthesizer::AttributeSynthesizer,
        log_builder::OcelLogBuilder,
        object_pool::ObjectPoolManager,
        object_type_universe::ObjectTypeUniverse,
        relationship_assigner::{ObjectRegistry, RelationshipAssigner},
    },
    objects::case_log::TIMESTAMP_KEY,
};

/// The identifier of the case object: the case's own id, or a positional placeholder.
/// Ids already in use get a `#n` suffix.
fn case_object_id(case: &Case, case_index: usize, registry: &impl ObjectRegistry) -> String {
    let base = match &case.id {
        Some(id) => id.clone(),
        None => {
            log::warn!("case {} has no identifier; using a placeholder", case_index);
            format!("Trace_{}", case_index)
        }
    };
    if !registry.is_registered(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}#{}", base, n);
        if !registry.is_registered(&candidate) {
            log::warn!(
                "case identifier `{}` is used more than once; renamed to `{}`",
                base,
                candidate
            );
            return candidate;
        }
        n += 1;
    }
}

/// Converts a case log into an object-centric event log, drawing every random choice from `rng`.
///
/// The object-type universe is drawn once, up front. Then, case by case and event by event,
/// objects are attached to events, reusing earlier objects of the same case with the
/// configured probability. Any error aborts the conversion without producing a log.
pub fn convert_case_log<R: Rng + ?Sized>(
    case_log: &CaseLog,
    parameters: &GenerationParameters,
    rng: &mut R,
) -> Result<ObjectCentricEventLog> {
    parameters.validate()?;

    let universe =
        ObjectTypeUniverse::sample(&parameters.object_types(), &parameters.case_object_type, rng)?;
    let synthesizer =
        AttributeSynthesizer::new(parameters.event_attributes(), parameters.object_attributes());
    let assigner = RelationshipAssigner::new(
        parameters.object_types_per_event(),
        parameters.objects_per_type_per_event(),
        parameters.reuse_object_probability,
    );
    let reserved_keys = case_log.reserved_keys();
    let fallback_timestamp = Utc::now().to_rfc3339();

    let mut pools = ObjectPoolManager::new();
    let mut builder = OcelLogBuilder::new();

    log::info!(
        "convert case log with {} cases into an object-centric event log",
        case_log.number_of_cases()
    );

    for (case_index, case) in case_log.cases.iter().enumerate() {
        let case_id = case_object_id(case, case_index, &builder);
        log::debug!("case `{}` with {} events", case_id, case.events.len());

        pools.start_case(&case_id, universe.case_type(), universe.types());
        let case_attributes = synthesizer.object_attributes(rng);
        builder.register_object(
            case_id.clone(),
            universe.case_type().to_string(),
            case_attributes,
        )?;

        for (event_index, event) in case.events.iter().enumerate() {
            let activity = match event.get(&case_log.activity_key) {
                Some(activity) => activity.clone(),
                None => {
                    log::warn!(
                        "event {} of case `{}` has no activity; using a placeholder",
                        event_index,
                        case_id
                    );
                    format!("Activity_{}", event_index)
                }
            };
            let timestamp = match event.get(TIMESTAMP_KEY) {
                Some(timestamp) => timestamp.clone(),
                None => {
                    log::warn!(
                        "event {} of case `{}` has no timestamp; using the current time",
                        event_index,
                        case_id
                    );
                    fallback_timestamp.clone()
                }
            };

            let relationships = assigner.assign(
                &case_id,
                &universe,
                &mut pools,
                &synthesizer,
                &mut builder,
                rng,
            )?;

            let attributes = synthesizer.event_attributes(
                event.attributes.iter().map(|(key, value)| (key, value)),
                &reserved_keys,
                rng,
            );

            builder.add_event(activity, timestamp, relationships.flatten(), attributes);
        }

        pools.finish_case(&case_id);
    }

    let log = builder.finalize();
    log::info!(
        "created {} events and {} objects of {} object types",
        log.number_of_events(),
        log.number_of_objects(),
        log.global_log.object_types.len()
    );
    Ok(log)
}

impl<'a> TryFrom<(&'a CaseLog, &'a GenerationParameters, u64)> for ObjectCentricEventLog {
    type Error = Error;

    /// Converts with a generator seeded once from `seed`.
    fn try_from(value: (&'a CaseLog, &'a GenerationParameters, u64)) -> Result<Self, Self::Error> {
        let (case_log, parameters, seed) = value;
        let mut rng = StdRng::seed_from_u64(seed);
        convert_case_log(case_log, parameters, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::{
        Case, CaseEvent, CaseLog, ObjectCentricEventLog, convert_case_log,
        tests::fixed_parameters,
    };

    fn event(activity: &str, second: u32) -> CaseEvent {
        CaseEvent::new(vec![
            ("concept:name".to_string(), activity.to_string()),
            (
                "time:timestamp".to_string(),
                format!("2024-01-01T00:00:{:02}+00:00", second),
            ),
        ])
    }

    #[test]
    fn convert_missing_fields() {
        let case_log = CaseLog::new(vec![Case::new(None, vec![CaseEvent::default()])]);
        let mut rng = StdRng::seed_from_u64(1);
        let log = convert_case_log(&case_log, &fixed_parameters(), &mut rng).unwrap();

        let (_, event) = &log.events[0];
        assert_eq!(event.activity, "Activity_0");
        assert!(!event.timestamp.is_empty());
        assert_eq!(event.object_references[0], "Trace_0");
        assert_eq!(log.get_object("Trace_0").unwrap().object_type, "case");
    }

    #[test]
    fn convert_duplicate_case_ids() {
        let case_log = CaseLog::new(vec![
            Case::new(Some("x".to_string()), vec![event("a", 1)]),
            Case::new(Some("x".to_string()), vec![event("b", 2)]),
        ]);
        let log: ObjectCentricEventLog = (&case_log, &fixed_parameters(), 5).try_into().unwrap();

        assert_eq!(log.events[0].1.object_references[0], "x");
        assert_eq!(log.events[1].1.object_references[0], "x#2");
        assert_eq!(log.get_object("x#2").unwrap().object_type, "case");
    }

    #[test]
    fn convert_case_id_colliding_with_generated_object() {
        let case_log = CaseLog::new(vec![
            Case::new(Some("c".to_string()), vec![event("a", 1)]),
            Case::new(Some("ot1_0002".to_string()), vec![event("b", 2)]),
        ]);
        let log: ObjectCentricEventLog = (&case_log, &fixed_parameters(), 5).try_into().unwrap();

        //the first case created ot1_0001, the second case object takes ot1_0002,
        //so the second case's own ot1 object must skip to ot1_0003
        assert_eq!(
            log.events[1].1.object_references,
            vec!["ot1_0002", "ot1_0003"]
        );
        assert_eq!(log.get_object("ot1_0002").unwrap().object_type, "case");
    }

    #[test]
    fn convert_invalid_parameters() {
        let case_log = CaseLog::new(vec![Case::new(Some("c".to_string()), vec![event("a", 1)])]);
        let mut parameters = fixed_parameters();
        parameters.object_types_per_event_min = 3.0;
        let result: anyhow::Result<ObjectCentricEventLog> =
            (&case_log, &parameters, 5).try_into();
        assert!(result.is_err());
    }
}
