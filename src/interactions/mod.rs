mod raycast;
mod collider_registry;
mod collision_probe;
mod contact_resolver;

pub use raycast::*;
pub use collider_registry::*;
pub use collision_probe::*;
pub use contact_resolver::*;

#[cfg(test)]
mod raycast_tests;
#[cfg(test)]
mod collider_registry_tests;
