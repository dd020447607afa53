//! Route modules for the node API surface.
//!
//! | Prefix | Module | Domain |
//! |---|---|---|
//! | `/v1/transactions/*` | [`transactions`] | broadcast and receipts |
//! | `/v1/records/*`, `/v1/events` | [`records`] | ledger read path |
//! | `/v1/faucet`, `/v1/accounts/*` | [`faucet`] | dev funding and balances |

pub mod faucet;
pub mod records;
pub mod transactions;
