//! Application layer of the configuration store.
//!
//! # Sub-modules
//!
//! - **`service`** – The `ConfigurationService` trait: the capability surface
//!   host code programs against, plus the always-ready `Completion` type.
//!
//! - **`scoped_store`** – `ScopedConfigurationStore`, the in-memory
//!   implementation with per-resource overrides.
//!
//! - **`registry`** – The collaborator that lists default property names.
//!
//! - **`change_events`** – Change notification payloads.
//!
//! Nothing here touches the file system; fixture loading lives in
//! `infrastructure`.

pub mod change_events;
pub mod registry;
pub mod scoped_store;
pub mod service;
