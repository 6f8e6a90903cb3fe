pub mod doubles;
pub mod reports;
pub mod scenarios;
pub mod seeds;
pub mod tester;

pub use scenarios::{ScenarioKind, list_scenarios};
pub use seeds::resolve_seeds;
pub use tester::*;
