pub mod encode;
pub mod model;
pub mod predict;
pub mod types;
