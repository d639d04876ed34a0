pub use super::channels::Entity as Channels;
pub use super::devices::Entity as Devices;
pub use super::sessions::Entity as Sessions;
pub use super::users::Entity as Users;
