//! Simulation module
//!
//! All gameplay logic lives here:
//! - Pairwise charge forces and integration
//! - Collision against walls, the goal and the play area
//! - Depth ordering of the particle store
//! - Editing operations driven by the input layer
//!
//! Nothing here renders, reads files or touches the clock.

pub mod charge;
pub mod collision;
pub mod depth;
pub mod edit;
pub mod forces;
pub mod rect;
pub mod state;
pub mod store;
pub mod tick;

pub use charge::{Charge, CursorMode};
pub use collision::{Obstacles, inside_goal};
pub use depth::depth_sort;
pub use edit::CursorFeedback;
pub use forces::{compute_acceleration, integrate};
pub use rect::{Margins, Rect};
pub use state::{
    DrawKind, Drawing, GameEvent, GameMode, GamePhase, GameState, Particle, ParticleId, Wall,
    WallId,
};
pub use store::{ParticleStore, WallStore};
pub use tick::tick;
