mod price_hint;
mod selector;

pub use price_hint::{HintPhase, PriceHint};
pub use selector::{LOADING_PLACEHOLDER, SectorOption, SelectorWidget};
#[cfg(test)]
pub use selector::CHOOSE_PLACEHOLDER;
