// HandBrakeCLI query codec - independent of the command line front end

pub mod core;

pub use core::*;
