use crate::camera::{Direction, FreeCamera};

/// Camera input gathered while polling events for a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
	movements: Vec<Direction>,
	look: (f32, f32),
}

impl FrameInput {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, direction: Direction) {
		self.movements.push(direction);
	}

	/// Accumulates raw pointer motion.
	pub fn look(&mut self, x_offset: f32, y_offset: f32) {
		self.look.0 += x_offset;
		self.look.1 += y_offset;
	}

	pub fn movements(&self) -> &[Direction] {
		&self.movements
	}

	pub fn look_offset(&self) -> (f32, f32) {
		self.look
	}

	pub fn is_empty(&self) -> bool {
		self.movements.is_empty() && self.look == (0.0, 0.0)
	}

	/// Applies the frame to `camera`, rotation first and then each movement in the
	/// order it was pushed.
	pub fn apply(&self, camera: &mut FreeCamera, delta: f32) {
		if self.look != (0.0, 0.0) {
			camera.rotate_camera(self.look.0, self.look.1);
		}
		for direction in &self.movements {
			camera.move_camera(*direction, delta);
		}
	}

	pub fn clear(&mut self) {
		self.movements.clear();
		self.look = (0.0, 0.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nalgebra as na;

	#[test]
	fn test_empty_frame_leaves_camera_alone() {
		let input = FrameInput::new();
		let mut camera = FreeCamera::default();
		input.apply(&mut camera, 1.0);

		assert!(input.is_empty());
		assert_eq!(camera, FreeCamera::default());
	}

	#[test]
	fn test_look_accumulates() {
		let mut input = FrameInput::new();
		input.look(1.0, 2.0);
		input.look(3.0, -4.0);
		assert_eq!(input.look_offset(), (4.0, -2.0));
		assert!(!input.is_empty());
	}

	#[test]
	fn test_rotation_is_applied_before_movement() {
		let mut input = FrameInput::new();
		input.push(Direction::Forward);
		// A quarter turn to the right of -Z
		input.look(90.0 / 0.005, 0.0);

		let mut camera = FreeCamera::default();
		input.apply(&mut camera, 1.0);

		let expected = na::Point3::new(2.5, 0.0, 3.0);
		assert!((camera.position - expected).norm() < 1e-4, "{:?}", camera.position);
	}

	#[test]
	fn test_movements_are_applied_in_order() {
		let mut input = FrameInput::new();
		input.push(Direction::Up);
		input.push(Direction::Backward);
		input.push(Direction::Up);
		assert_eq!(input.movements(), &[Direction::Up, Direction::Backward, Direction::Up]);

		let mut camera = FreeCamera::default();
		input.apply(&mut camera, 0.5);
		let expected = na::Point3::new(0.0, 2.5, 4.25);
		assert!((camera.position - expected).norm() < 1e-5, "{:?}", camera.position);
	}

	#[test]
	fn test_clear() {
		let mut input = FrameInput::new();
		input.push(Direction::Left);
		input.look(5.0, 5.0);
		input.clear();
		assert!(input.is_empty());
		assert_eq!(input, FrameInput::default());
	}
}
