mod camera;
mod clock;
mod controls;
mod texture;

pub use camera::{Camera, Direction, FreeCamera, Projection};
pub use clock::FrameClock;
pub use controls::FrameInput;
pub use texture::{Rgba, Texture};
