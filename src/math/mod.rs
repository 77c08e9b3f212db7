//! Integer arithmetic for pair calculations.
//!
//! Everything here works on 256-bit integers and floors. Products that
//! could exceed 256 bits are widened to 512 bits first.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`isqrt`] | First-deposit share issuance |
//! | [`mul_div`] | Proportional shares and payouts |
//! | [`CheckedArithmetic`] | `Result`-returning add/sub on domain types |
//! | [`get_amount_out`], [`get_amount_in`] | Client-side swap quotes |

mod checked;
mod quote;
mod sqrt;

pub use checked::{mul_div, CheckedArithmetic};
pub use quote::{get_amount_in, get_amount_out};
pub use sqrt::isqrt;
