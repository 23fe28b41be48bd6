//! Parsing of raw command input into typed arguments and flags.
//!
//! A command declares its inputs as an [`ArgConfig`]. On invocation, the input after the command
//! name is split by the lexer of the configured [`Syntax`] ([`comma`] or [`shellword`]) and every
//! piece is then parsed with the [`ArgType`] it was declared with. The result is an [`Args`] map.
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")] async fn main() {
//! use argot::{types, ArgConfig, Flag, RequiredArg, Syntax};
//!
//! let config = ArgConfig::new(Syntax::Shellword)
//!     .required(RequiredArg::new("amount", types::Integer::default()))
//!     .flag(Flag::new("silent", types::Switch));
//!
//! let args = config.parse("-silent 5", None).await.unwrap();
//! assert_eq!(args.get::<i64>(0), Some(5));
//! assert_eq!(args.flag::<bool>("silent"), Some(true));
//! # }
//! ```

mod args;
pub use args::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

pub(crate) mod helper;
pub use helper::{RawFlag, RawInput};

mod value;
pub use value::*;

pub mod comma;
pub mod shellword;
pub mod types;
pub use types::CodeBlock;
