pub mod constants {
    pub mod ocel_gen_object;
    pub mod ocel_gen_object_type;
}
pub mod conversions {
    pub mod to_case_log;
    pub mod to_object_centric_event_log;
}
pub mod generation {
    pub mod attribute_synthesizer;
    pub mod log_builder;
    pub mod object_pool;
    pub mod object_type_universe;
    pub mod relationship_assigner;
    pub mod triangular;
}
pub mod objects {
    pub mod case_log;
    pub mod object_centric_event_log;
}
pub mod traits {
    pub mod exportable;
    pub mod importable;
    pub mod infoable;
}
pub mod config;
pub mod ordered_map;

pub use crate::config::{GenerationParameters, GeneratorConfig};
pub use crate::constants::ocel_gen_object::OcelGenObject;
pub use crate::constants::ocel_gen_object_type::OcelGenObjectType;
pub use crate::conversions::to_object_centric_event_log::convert_case_log;
pub use crate::generation::triangular::TriangularRange;
pub use crate::objects::case_log::{Case, CaseEvent, CaseLog};
pub use crate::objects::object_centric_event_log::{
    ObjectCentricEventLog, OcelEvent, OcelGlobalLog, OcelObject,
};
pub use crate::traits::exportable::Exportable;
pub use crate::traits::importable::Importable;
pub use crate::traits::infoable::Infoable;

pub type ObjectType = String;
pub type ObjectId = String;
