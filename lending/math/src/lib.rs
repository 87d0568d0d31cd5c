//! Fixed-point arithmetic and interest accrual for previewing a lending
//! protocol's state on the client.
//!
//! Every number the protocol reports, whether an amount, a rate, or an index,
//! is an integer string with an implied number of decimal places. This crate
//! parses those strings into [`ScaledDecimal`]s without ever passing through
//! floating point, and reproduces the contract's own ray (27 decimals) and wad
//! (18 decimals) rounding, so a preview computed here agrees with what the
//! contract settles to the last digit.
//!
//! All functions are pure. The one exception, [`calculate_compounded_interest`],
//! reads the system clock and delegates to the pure
//! [`calculate_compounded_interest_at`].

mod error;
mod interest;
mod percent;
mod ray;
mod reserve;
mod scaled;

pub use {
    bnum::types::I512, error::*, interest::*, percent::*, ray::*, reserve::*, scaled::*,
};
