pub mod read_representation;

pub use read_representation::ReadRepresentation;
