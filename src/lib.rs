//! cmdflags - command-line argument marshalling.
//!
//! Split a command line into arguments, join arguments back into a quoted
//! command line for Unix shells or cmd.exe, and compile structured options
//! into an argument vector.

pub mod config;
pub mod flags;
pub mod input;
pub mod output;

pub use config::Config;
pub use flags::{
    Platform, SplatObject, SplatOptions, ValidationError, Value, join, join_for, splat, split,
    unix_join, windows_join,
};
pub use input::Request;
