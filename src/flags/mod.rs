//! Command-line argument marshalling: split, join and splat.

mod join;
mod object;
mod options;
mod splat;
mod split;
mod value;

pub use join::{Platform, join, join_for, unix_join, windows_join};
pub use object::SplatObject;
pub use options::{KeyPattern, NoFlagValues, NoFlags, ResolvedOptions, SplatOptions};
pub use splat::{Channel, ValidationError, splat};
pub use split::split;
pub use value::{Command, Value};
