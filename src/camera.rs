mod free;
pub use free::*;
mod projection;
pub use projection::*;

use nalgebra as na;

pub trait Camera {
	fn position(&self) -> na::Point3<f32>;
	fn view(&self) -> na::Matrix4<f32>;
	fn projection(&self) -> na::Matrix4<f32>;

	fn view_projection(&self) -> na::Matrix4<f32> {
		self.projection() * self.view()
	}
}

/// Movement commands understood by [`FreeCamera::move_camera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	Forward,
	Backward,
	Left,
	Right,
	Up,
	Down,
}
