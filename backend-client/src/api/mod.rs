//! Resource endpoints, one module per resource family. Everything here is
//! an inherent method on [`crate::Client`].

mod comments;
mod favorites;
mod illustrations;
mod parts;
mod vehicles;

pub use vehicles::default_fuel_types;
