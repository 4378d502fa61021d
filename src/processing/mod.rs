//! Text matching and screening module

pub mod similarity;
pub mod text_matcher;
pub mod extras;
pub mod screening;

pub use screening::{DocumentOutcome, DocumentReport, Screener, ScreeningOptions};
pub use text_matcher::{MatchResult, TextMatcher};
