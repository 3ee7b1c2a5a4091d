pub mod d6;

pub use d6::{create_d6, pip_offsets, pip_transforms};
