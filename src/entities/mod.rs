//! SeaORM entity definitions for the catalog schema

pub mod channels;
pub mod devices;
pub mod prelude;
pub mod sessions;
pub mod users;
