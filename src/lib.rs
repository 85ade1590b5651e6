pub mod config;
pub mod fk;
pub mod landmark;
#[cfg(feature = "desktop")]
pub mod render;
pub mod retarget;
pub mod rig;
pub mod solver;
