pub mod cursor;
pub mod model;
pub mod registry;
