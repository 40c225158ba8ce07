//! Template instantiation and source-patching engine for Minecraft mod
//! projects
//!
//! Takes a static template tree (a placeholder mod skeleton) and
//! mechanically transforms it into a concrete, compilable project:
//! package relocation, placeholder substitution, loader-specific manifest
//! rewrites, and on-demand generation of new mod content spliced into
//! existing Java source by brace-matched patching.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod copier;
pub mod elements;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod patch;
pub mod paths;
pub mod progress;
pub mod project;
pub mod templates;
pub mod versions;

pub use elements::{ItemElement, ModElement, ModElementManager};
pub use error::{EngineError, Result};
pub use generator::{GeneratedItem, ItemGenerator, RegistrationPatch, RegistrationStatus};
pub use metadata::{NoopToolchain, ProjectCreator, Toolchain};
pub use progress::{NullSink, ProgressSink, SubRange};
pub use project::{ModLoader, ProjectDescriptor};
