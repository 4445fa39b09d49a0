//! aemgen Intermediate Representation (IR)
//!
//! Everything between a raw generation request and the emitters:
//! - registry: static field-kind table and per-target rules
//! - field: request entries and validated field specs
//! - builder: raw entries → field specs (names, kinds, collisions)
//! - partition: tab layout from group directives
//! - validate: consistency checks over the assembled IR
//! - generation: the frozen `GenerationIr` the emitters read

pub mod builder;
pub mod error;
pub mod field;
pub mod generation;
pub mod naming;
pub mod partition;
pub mod registry;
pub mod types;
pub mod validate;

pub use builder::build_fields;
pub use error::{error_code, GenerateError, NameScope};
pub use field::*;
pub use generation::GenerationIr;
pub use partition::{resolve_partitions, Partition, DEFAULT_PARTITION_NAME, DEFAULT_PARTITION_TITLE};
pub use registry::{registry, Registry, TypeRule, CONTAINER_RESOURCE_TYPE};
pub use types::*;
pub use validate::validate;
