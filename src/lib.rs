//! Hilt configurator library
//!
//! The configuration and procedural assembly engine for a five-part stacked
//! hilt (pommel, bottom ring, body, top ring, emitter), plus the Bevy plugins
//! that draw it and let a user edit it.
//!
//! The core is plain data and pure functions: [`state`] holds the editable
//! configuration, [`resolve`] and [`layout`] derive colours and positions, and
//! [`assembly::resolve`] combines them into the [`assembly::AssemblyPlan`] a
//! renderer consumes.  [`session::Configurator`] ties the core to a
//! [`persist::KeyValueStore`] so every edit is saved before it is drawn.

pub mod assembly;
pub mod color;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod layout;
pub mod part;
pub mod persist;
pub mod plugin;
pub mod rendering;
pub mod resolve;
pub mod session;
pub mod state;
