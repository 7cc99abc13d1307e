use process_mining::event_log::event_log_struct::{Attribute, AttributeValue, EventLog, Trace};

use crate::{
    Case, CaseEvent, CaseLog,
    objects::case_log::{CASE_ID_KEY, DEFAULT_ACTIVITY_KEY},
};

/// Renders an XES attribute value as a string; dates become RFC 3339 (ISO 8601).
pub fn attribute_value_to_string(value: &AttributeValue) -> String {
    match value {
        AttributeValue::String(s) => s.clone(),
        AttributeValue::Date(d) => d.to_rfc3339(),
        AttributeValue::Int(i) => i.to_string(),
        AttributeValue::Float(f) => f.to_string(),
        AttributeValue::Boolean(b) => b.to_string(),
        other => format!("{:?}", other),
    }
}

fn attributes_to_strings(attributes: &[Attribute]) -> Vec<(String, String)> {
    attributes
        .iter()
        .map(|attribute| {
            (
                attribute.key.clone(),
                attribute_value_to_string(&attribute.value),
            )
        })
        .collect()
}

impl From<&Trace> for Case {
    fn from(trace: &Trace) -> Self {
        let id = trace
            .attributes
            .iter()
            .find(|attribute| attribute.key == CASE_ID_KEY)
            .map(|attribute| attribute_value_to_string(&attribute.value));

        let events = trace
            .events
            .iter()
            .map(|event| CaseEvent::new(attributes_to_strings(&event.attributes)))
            .collect();

        Case::new(id, events)
    }
}

impl From<EventLog> for CaseLog {
    fn from(value: EventLog) -> Self {
        Self {
            activity_key: DEFAULT_ACTIVITY_KEY.to_string(),
            cases: value.traces.iter().map(Case::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use process_mining::event_log::event_log_struct::{Attribute, AttributeValue, Event, Trace};

    use crate::Case;

    #[test]
    fn rust4pm_trace_conversion() {
        let timestamp = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .unwrap();
        let trace = Trace {
            attributes: vec![Attribute::new(
                "concept:name".to_string(),
                AttributeValue::String("case 7".to_string()),
            )]
            .into(),
            events: vec![Event {
                attributes: vec![
                    Attribute::new(
                        "concept:name".to_string(),
                        AttributeValue::String("register".to_string()),
                    ),
                    Attribute::new("time:timestamp".to_string(), AttributeValue::Date(timestamp)),
                    Attribute::new("cost".to_string(), AttributeValue::Int(12)),
                ]
                .into(),
            }],
        };

        let case = Case::from(&trace);
        assert_eq!(case.id.as_deref(), Some("case 7"));
        assert_eq!(case.events.len(), 1);

        let event = &case.events[0];
        assert_eq!(event.get("concept:name").unwrap(), "register");
        assert_eq!(
            event.get("time:timestamp").unwrap(),
            "2024-03-01T12:30:00+01:00"
        );
        assert_eq!(event.get("cost").unwrap(), "12");
    }

    #[test]
    fn rust4pm_trace_without_name() {
        let trace = Trace {
            attributes: vec![].into(),
            events: vec![],
        };
        assert_eq!(Case::from(&trace), Case::new(None, vec![]));
    }
}
