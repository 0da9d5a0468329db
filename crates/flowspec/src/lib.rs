//! Precedence ordering and feasibility validation of BGP FlowSpec rules.
//!
//! The crate provides two pure decision procedures over FlowSpec values:
//!
//! - [`ordering`] ranks FlowSpec component lists against each other following RFC 8955 §5.1,
//!   from the most to the least specific rule.
//! - [`feasibility`] decides whether a FlowSpec rule may be installed, by correlating it with the
//!   local unicast routing table as required by RFC 8955 §6 and RFC 9117 §4.
//!
//! The unicast RIB is never owned by this crate; it is consulted through the
//! [`UnicastRib`][feasibility::UnicastRib] trait.

pub mod address;
pub mod component;
pub mod feasibility;
pub mod ordering;
pub mod route;
