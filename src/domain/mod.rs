//! Domain layer: ledger entities, transfer rules and the ports the
//! application layer talks to.

pub mod account;
pub mod ports;
pub mod transfer;
