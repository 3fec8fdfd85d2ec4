// Domain layer - Sensor document and field logic
pub mod document;
pub mod field;
