use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine layouts for new boards.
pub trait MineGenerator {
    fn generate(&mut self, config: &BoardConfig) -> Result<MineLayout>;
}
