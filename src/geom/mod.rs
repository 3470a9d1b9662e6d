pub mod angle;
pub mod bbox;
pub mod intersection;
pub mod point;
pub mod predicates;
pub mod segment;
