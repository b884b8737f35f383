//! Signal fusion.
//!
//! Collapses the per-indicator results (and optional external advisory
//! signals) into one weighted BUY/SELL/HOLD recommendation. Each
//! conclusive input contributes `weight * confidence / 100` to the side
//! its signal votes for; HOLD votes consume weight without scoring either
//! side, which pulls both normalized scores toward zero.

mod ai;
mod evaluator;
mod weights;

pub use ai::{AiContext, AiSignal};
pub use evaluator::evaluate;
pub use weights::{load_weights, FusionWeights};
