pub mod energy;
pub mod length;
pub mod mass;
pub mod time;

#[cfg(test)]
mod mass_test;
#[cfg(test)]
mod time_test;

pub use energy::{Energy, KILOTON_TNT_J, MEGATON_TNT_J};
pub use length::{Length, EARTH_RADIUS_M, MOON_RADIUS_M};
pub use mass::{Mass, EARTH_MASS_KG, MOON_MASS_KG, SOLAR_MASS_KG};
pub use time::{Time, SECONDS_PER_DAY, SECONDS_PER_YEAR};
