//! SeaORM repository implementations
//!
//! Each repository wraps the shared connection and converts entity models
//! into the domain types in [`crate::models`].

pub mod channel;
pub mod device;
pub mod session;
pub mod traits;
pub mod user;

pub use channel::ChannelSeaOrmRepository;
pub use device::DeviceSeaOrmRepository;
pub use session::SessionSeaOrmRepository;
pub use traits::{ChannelRepository, DeviceRepository, SessionRepository, UserRepository};
pub use user::UserSeaOrmRepository;
