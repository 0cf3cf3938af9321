//! Pooled particle simulation.
//!
//! Split into three pieces:
//! - `particle`: the plain slot record
//! - `behavior`: spawn and update strategies, including the stock kinds
//! - `system`: the fixed pool and its ring spawn cursor

mod behavior;
mod particle;
mod system;

pub use behavior::{Kinematics, ParticleKind, SpawnBehavior, UpdateBehavior};
pub use particle::Particle;
pub use system::ParticleSystem;
