pub mod meshes;
pub mod roll;
pub mod systems;
pub mod throw_control;
pub mod trace;
pub mod types;

pub use meshes::*;
pub use roll::*;
pub use systems::*;
pub use throw_control::*;
pub use trace::*;
pub use types::*;
