mod integrator;
mod sleep_controller;
mod pipeline;

pub use integrator::*;
pub use sleep_controller::*;
pub use pipeline::*;

#[cfg(test)]
mod integrator_tests;
#[cfg(test)]
mod sleep_controller_tests;
