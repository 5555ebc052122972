//! # Automated Market Maker (AMM) Module
//!
//! The fixed-product curve that prices YES/NO shares lives in
//! [`fixed_product`]. It owns no state: the market passes its current
//! reserves in and commits the quoted result atomically.

pub mod fixed_product;

pub use fixed_product::*;
