//! Demo suites, registered in the order they are listed here

use nutest::{Registry, RegistryError};

mod fixtures;
mod floats;
mod math;
mod memory;
mod strings;

pub fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    math::suite::register(registry)?;
    strings::suite::register(registry)?;
    floats::suite::register(registry)?;
    memory::suite::register(registry)?;
    fixtures::suite::register(registry)?;
    Ok(())
}
