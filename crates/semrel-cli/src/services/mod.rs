//! Service layer for business logic with dependency injection.
//!
//! Services accept any [`semrel_github::ReleaseApi`], so they can be
//! exercised against mock implementations.

pub mod release;
pub mod resolve;

#[cfg(test)]
pub mod test_mocks;

pub use release::{ReleaseOutcome, ReleaseService};
pub use resolve::{TagResolver, compile_range, select_latest};
