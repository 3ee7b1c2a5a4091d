//! Dice Tray
//!
//! Shake and throw six-sided dice into a physics-simulated 3D tray and read
//! off the faces they land on.

pub mod dice3d;
