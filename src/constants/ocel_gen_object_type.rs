use std::fmt::Display;

#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
pub enum OcelGenObjectType {
    CaseLog,
    ObjectCentricEventLog,
}

impl Display for OcelGenObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OcelGenObjectType::CaseLog => "case log",
                OcelGenObjectType::ObjectCentricEventLog => "object-centric event log",
            }
        )
    }
}
