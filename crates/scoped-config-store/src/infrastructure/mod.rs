//! Infrastructure layer for the configuration store.
//!
//! Contains the file-system facing adapter that seeds a store from a TOML
//! fixture.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `scoped_config_core`, but MUST NOT be imported by the `application` layer.

pub mod storage;
