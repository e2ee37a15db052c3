#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core structures for EIP-712 schemas of Cosmos transaction payloads.
//!
//! Legacy amino-JSON Cosmos transactions can be signed by Ethereum wallets as
//! EIP-712 typed data. The `types` half of that typed data consists of a fixed
//! part (domain, transaction envelope, fee, coin) and a part generated from the
//! shape of the transaction's messages. This crate holds what both parts share.
//!
//! # Modules
//!
//! - [`schema`] - [`Eip712Field`] and the insertion-ordered [`TypeTable`]
//! - [`base`] - The [`BaseTypes`] collaborator and the stock [`CosmosBaseTypes`]
//! - [`payload`] - Message slot naming, `msgs` flattening, and message validation

pub mod base;
pub mod payload;
pub mod schema;

pub use base::{BaseTypes, CosmosBaseTypes};
pub use schema::{Eip712Field, TypeTable, is_atomic_type};
