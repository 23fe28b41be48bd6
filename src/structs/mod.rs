//! Plain data structs that define the framework configuration.

mod command;
pub use command::*;

mod context;
pub use context::*;

mod framework_error;
pub use framework_error::*;

mod framework_options;
pub use framework_options::*;
