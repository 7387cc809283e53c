//! Domain models for Taro.
//!
//! # Core Concepts
//!
//! ## Static Data
//!
//! - [`Card`]: A catalog entry with a short keyword meaning and optional long text.
//!   Card names are unique and double as identifiers.
//! - [`Spread`]: One of four fixed layouts ([`SpreadId`]) with a required card count.
//!
//! ## Session Results
//!
//! - [`Reading`]: The immutable outcome of a completed card selection.
//! - [`History`]: The ten most recent readings, newest first.
//! - [`Interpretation`]: Text generated for a reading (see [`crate::interpret`]).
//!
//! ## Feedback
//!
//! - [`Notice`]: Transient message shown to the user with an auto-dismiss delay.

mod card;
mod history;
mod notice;
mod reading;
mod spread;

pub use card::*;
pub use history::*;
pub use notice::*;
pub use reading::*;
pub use spread::*;
