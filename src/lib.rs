//! Chapter Credits - tiered chapter pricing for edition-based publishing
//!
//! Authors buy additional chapter credits for an edition in bundles. This
//! crate prices those bundles from a cumulative table, offers the remaining
//! purchasable quantities, and hands a confirmed purchase to the billing
//! collaborator's hosted checkout.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
