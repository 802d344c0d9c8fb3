mod chain;

pub use chain::*;
