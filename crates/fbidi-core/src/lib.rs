#![forbid(unsafe_code)]

//! Shared foundation for the frankenbidi crates.
//!
//! - [`props`]: directional class, mirroring, control, mark and joining
//!   lookups plus the process-wide [`props::PropsTable`].
//! - [`error`]: the [`BidiError`] type every fallible operation returns.

pub mod error;
pub mod props;
mod tables;

pub use error::{BidiError, Result};
pub use props::{BidiClass, JoiningGroup, JoiningType, PropsTable};
