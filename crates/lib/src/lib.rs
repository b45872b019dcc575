//! nativedist-lib: building and packaging native graphics/JS engine libraries
//!
//! This crate provides the pieces behind the `nativedist` CLI:
//! - `glob` / `copy`: projecting build outputs into a distribution tree
//! - `config`: the target configuration read from the environment
//! - `execute`: running external tools from an explicit context
//! - `sources`: pinned checkouts and depot tools
//! - `project`: per-project GN arguments, build steps and install layout
//! - `pipeline`: the end-to-end build of a set of projects

pub mod config;
pub mod consts;
pub mod copy;
pub mod execute;
pub mod glob;
pub mod pipeline;
pub mod platform;
pub mod project;
pub mod sources;
pub mod toolchain;
pub mod util;
