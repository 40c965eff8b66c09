//! `tm-bignum` — the arbitrary-scale number type behind tickmint's economy.
//!
//! Currency and large counters in an incremental game outgrow `f64` long
//! before the game is over.  [`ScaledNumber`] stores a value as a normalized
//! decimal mantissa in `[1, 10)` (or exactly 0) times ten to an
//! arbitrary-precision integer exponent, so late-game magnitudes like
//! `3.7e1_000_000` stay exact in the exponent and cheap to compare.
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`scaled`]   | `ScaledNumber`: add/subtract/multiply, total ordering    |
//! | [`naming`]   | Long-scale name synthesis (million … septemvigintillion) |
//! | [`notation`] | `Notation` selector for the three renderers              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod naming;
pub mod notation;
pub mod scaled;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use notation::Notation;
pub use scaled::ScaledNumber;
