pub mod driver;
pub mod grid;
pub mod pattern;
pub mod render;
pub mod rule_set;
pub mod scheduler;

pub use driver::Driver;
pub use driver::Outcome;
pub use driver::SimulationConfig;
pub use driver::SimulationError;
pub use driver::simulate;
pub use grid::Grid;
pub use rule_set::B3S23;
pub use rule_set::RuleSet;
