//! Building blocks shared by the Moon NFT contracts: error codes, result
//! aliases, event tags and the admin/maintainer authority sets.

#![cfg_attr(not(feature = "std"), no_std)]

mod authority;
mod constants;
mod errors;
mod types;

pub use authority::*;
pub use constants::*;
pub use errors::*;
pub use types::*;

use concordium_cis2::Cis2Error;
use concordium_std::*;
