#![allow(ambiguous_glob_reexports)]

pub mod accept_admin;
pub mod activate_order;
pub mod approve_order;
pub mod close_order;
pub mod create_order;
pub mod create_pool;
pub mod initialize_engine;
pub mod reject_order;
pub mod request_payment;
pub mod set_chain_wallet;
pub mod submit_payment;
pub mod sweep_expired;
pub mod transfer_admin;

pub use accept_admin::*;
pub use activate_order::*;
pub use approve_order::*;
pub use close_order::*;
pub use create_order::*;
pub use create_pool::*;
pub use initialize_engine::*;
pub use reject_order::*;
pub use request_payment::*;
pub use set_chain_wallet::*;
pub use submit_payment::*;
pub use sweep_expired::*;
pub use transfer_admin::*;
