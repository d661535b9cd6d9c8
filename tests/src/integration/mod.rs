//! # Integration Flows
//!
//! Cross-crate choreography: bundles feed multisig sessions, and the
//! validator mints attestations whose bundles verify with qi-crypto.

pub mod bundle_flows;
pub mod cross_chain_flows;
pub mod multisig_flows;
