//! Observer seam for training-loop lifecycle events.
//!
//! The contract is a single method: the loop calls
//! [`EpochObserver::on_epoch_end`] once per completed epoch with an
//! [`EpochContext`]. No inheritance hierarchy, no other hooks.
//!
//! # Example
//!
//! ```rust
//! use vigilar::{EpochContext, EpochObserver};
//!
//! struct PrintObserver;
//!
//! impl EpochObserver for PrintObserver {
//!     fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> vigilar::Result<()> {
//!         if let Some(loss) = ctx.metrics.get("loss") {
//!             println!("epoch {}: loss={loss:.4}", ctx.epoch);
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod manager;
mod traits;

pub use manager::ObserverSet;
pub use traits::{EpochContext, EpochObserver};
