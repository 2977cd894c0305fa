use super::{Camera, Direction, Projection};
use nalgebra as na;

const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.005;
const DEFAULT_YAW: f32 = 270.0;
const DEFAULT_PITCH: f32 = 0.0;

/// Yaw at which the camera looks down -Z.
const FORWARD_YAW: f32 = 270.0;
const PITCH_LIMIT: f32 = 89.0;

/// First person camera steered by yaw/pitch mouse-look and six-way movement.
///
/// The orientation is stored as two angles in degrees. Every mutator rebuilds the
/// `direction`, `right` and `camera_up` vectors from those angles, so they are never
/// out of step with each other.
#[derive(Clone, Debug, PartialEq)]
pub struct FreeCamera {
	pub position: na::Point3<f32>,
	/// World units per second.
	pub movement_speed: f32,
	/// Degrees per unit of pointer motion.
	pub rotation_sensitivity: f32,
	pub projection: Projection,
	up: na::Vector3<f32>,
	direction: na::Vector3<f32>,
	right: na::Vector3<f32>,
	camera_up: na::Vector3<f32>,
	yaw: f32,
	pitch: f32,
}

impl Default for FreeCamera {
	fn default() -> Self {
		Self::new(
			na::Point3::new(0.0, 0.0, 3.0),
			na::Vector3::new(0.0, 0.0, -1.0),
			na::Vector3::y(),
		)
	}
}

impl Camera for FreeCamera {
	fn position(&self) -> na::Point3<f32> {
		self.position
	}

	fn view(&self) -> na::Matrix4<f32> {
		self.get_view_matrix()
	}

	fn projection(&self) -> na::Matrix4<f32> {
		self.projection.matrix()
	}
}

impl FreeCamera {
	/// The facing is always derived from the initial yaw and pitch, `direction`
	/// is only a starting value and gets replaced straight away.
	pub fn new(position: na::Point3<f32>, direction: na::Vector3<f32>, up: na::Vector3<f32>) -> Self {
		let mut camera = Self {
			position,
			movement_speed: DEFAULT_SPEED,
			rotation_sensitivity: DEFAULT_SENSITIVITY,
			projection: Projection::default(),
			up,
			direction,
			right: na::Vector3::x(),
			camera_up: up,
			yaw: DEFAULT_YAW,
			pitch: DEFAULT_PITCH,
		};
		camera.update_vectors();
		log::debug!(
			"Created camera at {:?} facing {:?}",
			camera.position.coords.as_slice(),
			camera.direction.as_slice()
		);
		camera
	}

	pub fn with_speed(mut self, speed: f32) -> Self {
		self.movement_speed = speed;
		self
	}

	pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
		self.rotation_sensitivity = sensitivity;
		self
	}

	pub fn with_projection(mut self, projection: Projection) -> Self {
		self.projection = projection;
		self
	}

	pub fn direction(&self) -> na::Vector3<f32> {
		self.direction
	}

	pub fn right(&self) -> na::Vector3<f32> {
		self.right
	}

	/// Up vector used for the view matrix. Points along -Y at rest.
	pub fn camera_up(&self) -> na::Vector3<f32> {
		self.camera_up
	}

	/// Reference up vector used by [`Direction::Up`] and [`Direction::Down`].
	pub fn world_up(&self) -> na::Vector3<f32> {
		self.up
	}

	/// Yaw in degrees, within `[0, 360)`.
	pub fn yaw(&self) -> f32 {
		self.yaw
	}

	/// Pitch in degrees, within `[-89, 89]`.
	pub fn pitch(&self) -> f32 {
		self.pitch
	}

	/// Moves the camera for `delta` seconds along one of its axes.
	///
	/// `Left` travels along `right` and `Right` against it.
	pub fn move_camera(&mut self, direction: Direction, delta: f32) {
		let offset = self.movement_speed * delta;

		match direction {
			Direction::Forward => self.position += self.direction * offset,
			Direction::Backward => self.position -= self.direction * offset,
			Direction::Left => self.position += self.right * offset,
			Direction::Right => self.position -= self.right * offset,
			Direction::Up => self.position += self.up * offset,
			Direction::Down => self.position -= self.up * offset,
		}

		log::trace!("Moved {:?} by {} to {:?}", direction, offset, self.position.coords.as_slice());
		self.update_vectors();
	}

	pub fn rotate_camera(&mut self, x_offset: f32, y_offset: f32) {
		self.yaw += self.rotation_sensitivity * x_offset;
		self.pitch += self.rotation_sensitivity * y_offset;

		if self.pitch > PITCH_LIMIT {
			self.pitch = PITCH_LIMIT;
		} else if self.pitch < -PITCH_LIMIT {
			self.pitch = -PITCH_LIMIT;
		}

		self.yaw = self.yaw.rem_euclid(360.0);
		// rem_euclid can round tiny negative angles up to the modulus itself
		if self.yaw >= 360.0 {
			self.yaw = 0.0;
		}

		log::trace!("Rotated to yaw {} pitch {}", self.yaw, self.pitch);
		self.update_vectors();
	}

	pub fn get_view_matrix(&self) -> na::Matrix4<f32> {
		let target = self.position + self.direction;
		na::Matrix4::look_at_rh(&self.position, &target, &self.camera_up)
	}

	fn update_vectors(&mut self) {
		let rotation = orientation(self.yaw, self.pitch);

		self.right = rotation * na::Vector3::<f32>::x();
		self.camera_up = rotation * -na::Vector3::<f32>::y();
		self.direction = rotation * -na::Vector3::<f32>::z();
	}
}

// Pitch about the local X axis, then yaw about world Y
fn orientation(yaw: f32, pitch: f32) -> na::Rotation3<f32> {
	let yaw = na::Rotation3::from_axis_angle(&na::Vector3::y_axis(), (FORWARD_YAW - yaw).to_radians());
	let pitch = na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), pitch.to_radians());

	yaw * pitch
}
