//! mxfield: field client for Maximo work orders
//!
//! A typed client for the Maximo OSLC REST API (sessions, work orders and
//! their child collections, attachments, failure prediction) plus the `mxf`
//! command-line front end built on it.

pub mod cli;
pub mod client;
pub mod core;
pub mod entities;
pub mod yaml;
