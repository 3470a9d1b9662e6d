pub mod rays;
pub mod start;
pub mod status;
pub mod viewport;
pub mod visibility;
