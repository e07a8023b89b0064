#![doc = "slice-sync-core: core logic library for slice-sync."]

//! This crate contains the data model, project/adapter resolution, local model loading,
//! diffing and the push pipeline for slice-sync.
//! Transport (HTTP clients, CLI glue) lives in the `slice-sync` crate and plugs in through
//! the traits in [`contract`].
//!
//! # Usage
//! Build a [`config::SyncConfig`] and a [`adapter::Project`], provide an
//! [`contract::Authenticator`] and a [`contract::ModelRepository`], then call
//! [`synchronise::synchronise`].

pub mod adapter;
pub mod config;
pub mod contract;
pub mod diff;
pub mod error;
pub mod loader;
pub mod remote;
pub mod synchronise;
