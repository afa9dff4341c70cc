//! Core of a session-authenticated form service. Administrators define forms
//! made of typed questions and employees fill them in; the admin side then
//! reviews per-user answer sheets and completion status.
//!
//! The crate owns storage and semantics only. A presentation layer resolves
//! the caller through [`session`], then drives [`catalog`], [`ledger`] and
//! [`review`] with the resolved user as an explicit argument; nothing here
//! reads ambient request state.

pub mod catalog;
pub mod config;
pub mod db;
pub mod directory;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod review;
pub mod session;

pub use error::{Error, Result};
