pub mod coordinate;
pub mod field;
pub mod session;

pub use coordinate::{Coordinate, Ring, MIN_RING_VERTICES};
pub use field::{
    DetailsPatch, FieldDetails, IrrigationType, Land, LandId, Partition, PartitionId,
};
pub use session::{ContainmentMode, Phase, Selection};
