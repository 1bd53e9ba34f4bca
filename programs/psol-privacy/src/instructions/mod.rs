//! Instruction handlers for the privacy pool.

pub mod admin;
pub mod deposit;
pub mod initialize_pool;
pub mod lock_verification_key;
pub mod set_verification_key;
pub mod transact;
pub mod withdraw;

pub use admin::*;
pub use deposit::*;
pub use initialize_pool::*;
pub use lock_verification_key::*;
pub use set_verification_key::*;
pub use transact::*;
pub use withdraw::*;
