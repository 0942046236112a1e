//! The Moon NFT marketplace contract.
//!
//! # Description
//! One contract instance keeps the whole inventory of the platform: the minter
//! with its id counters, the admin collection of staged NFT groups, the seller
//! catalog of loose NFTs and pack releases, and one collection per account.
//!
//! Assets are move-only values. Every operation moves them from one container
//! into another, so an NFT or a pack is always held in exactly one place and
//! can be withdrawn only once. Platform operations are restricted to the
//! maintainers of the instance; accounts act on their own collection only.

#![cfg_attr(not(feature = "std"), no_std)]
use concordium_std::*;

mod admin;
mod collection;
mod contract;
mod events;
mod external;
mod index;
mod minter;
mod nft;
mod seller;
mod state;
mod views;

#[concordium_cfg_test]
mod test_utils;
