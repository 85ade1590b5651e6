pub mod connections;
pub mod window;

pub use connections::{BODY_CONNECTIONS, HAND_CONNECTIONS};
pub use minifb::Key;
pub use window::MinifbRenderer;
