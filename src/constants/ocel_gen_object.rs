use anyhow::Result;
use std::fmt::Display;

use crate::{
    CaseLog, ObjectCentricEventLog, constants::ocel_gen_object_type::OcelGenObjectType,
    traits::infoable::Infoable,
};

#[derive(Clone, Debug)]
pub enum OcelGenObject {
    CaseLog(CaseLog),
    ObjectCentricEventLog(ObjectCentricEventLog),
}

impl OcelGenObject {
    pub fn get_type(&self) -> OcelGenObjectType {
        match self {
            OcelGenObject::CaseLog(_) => OcelGenObjectType::CaseLog,
            OcelGenObject::ObjectCentricEventLog(_) => OcelGenObjectType::ObjectCentricEventLog,
        }
    }
}

impl Display for OcelGenObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcelGenObject::CaseLog(o) => write!(f, "{}", o),
            OcelGenObject::ObjectCentricEventLog(o) => write!(f, "{}", o),
        }
    }
}

impl Infoable for OcelGenObject {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        match self {
            OcelGenObject::CaseLog(o) => o.info(f),
            OcelGenObject::ObjectCentricEventLog(o) => o.info(f),
        }
    }
}
