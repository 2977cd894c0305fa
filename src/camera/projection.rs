use nalgebra as na;

const DEFAULT_FOV: f32 = 45.0;
const DEFAULT_NEAR: f32 = 0.1;
const DEFAULT_FAR: f32 = 100.0;

/// Perspective lens for a viewport, rebuilt whenever its inputs change.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
	width: f32,
	height: f32,
	pixel_ratio: f32,
	fov: f32,
	near: f32,
	far: f32,
	perspective: na::Perspective3<f32>,
}

impl Default for Projection {
	fn default() -> Self {
		Self::new(1.0, 1.0)
	}
}

impl Projection {
	pub fn new(width: f32, height: f32) -> Self {
		let mut projection = Self {
			width,
			height,
			pixel_ratio: 1.0,
			fov: DEFAULT_FOV,
			near: DEFAULT_NEAR,
			far: DEFAULT_FAR,
			perspective: na::Perspective3::new(1.0, DEFAULT_FOV.to_radians(), DEFAULT_NEAR, DEFAULT_FAR),
		};
		projection.update();
		projection
	}

	pub fn width(&self) -> f32 {
		self.width
	}

	pub fn height(&self) -> f32 {
		self.height
	}

	pub fn size(&self) -> (f32, f32) {
		(self.width, self.height)
	}

	pub fn pixel_ratio(&self) -> f32 {
		self.pixel_ratio
	}

	/// Vertical field of view in degrees.
	pub fn fov(&self) -> f32 {
		self.fov
	}

	pub fn clip_planes(&self) -> (f32, f32) {
		(self.near, self.far)
	}

	/// Falls back to 1.0 for degenerate sizes, e.g. minimised windows.
	pub fn aspect(&self) -> f32 {
		if self.width <= 0.0 || self.height <= 0.0 || self.pixel_ratio <= 0.0 {
			return 1.0;
		}
		let aspect = (self.width / self.pixel_ratio) / self.height;
		// Perspective3 rejects ratios that are approximately zero
		if aspect.is_finite() && aspect > f32::EPSILON {
			aspect
		} else {
			1.0
		}
	}

	pub fn resize(&mut self, width: f32, height: f32) {
		self.width = width;
		self.height = height;
		self.update();
	}

	pub fn set_pixel_ratio(&mut self, ratio: f32) {
		self.pixel_ratio = ratio;
		self.update();
	}

	pub fn set_fov(&mut self, fov: f32) {
		if !(fov > 0.0 && fov < 180.0) {
			log::warn!("Ignoring invalid field of view: {}", fov);
			return;
		}
		self.fov = fov;
		self.update();
	}

	pub fn set_clip_planes(&mut self, near: f32, far: f32) {
		// Planes closer than Perspective3's relative_eq tolerance count as superimposed
		if !(near > 0.0 && far.is_finite() && far - near > f32::EPSILON * far.abs().max(1.0)) {
			log::warn!("Ignoring invalid clip planes: near {} far {}", near, far);
			return;
		}
		self.near = near;
		self.far = far;
		self.update();
	}

	pub fn matrix(&self) -> na::Matrix4<f32> {
		self.perspective.to_homogeneous()
	}

	fn update(&mut self) {
		self.perspective = na::Perspective3::new(self.aspect(), self.fov.to_radians(), self.near, self.far);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_aspect_accounts_for_pixel_ratio() {
		let mut projection = Projection::new(640.0, 480.0);
		assert!((projection.aspect() - 640.0 / 480.0).abs() < 1e-6);

		projection.set_pixel_ratio(2.0);
		assert!((projection.aspect() - 320.0 / 480.0).abs() < 1e-6);
	}

	#[test]
	fn test_zero_height_falls_back_to_square() {
		let projection = Projection::new(640.0, 0.0);
		assert_eq!(projection.aspect(), 1.0);
		assert!(projection.matrix().iter().all(|v| v.is_finite()));
	}

	#[test]
	fn test_tiny_aspect_falls_back_to_square() {
		let mut projection = Projection::new(640.0, 480.0);
		projection.set_pixel_ratio(1e10);
		assert_eq!(projection.aspect(), 1.0);

		projection.set_pixel_ratio(1.0);
		projection.resize(1e-8, 1.0);
		assert_eq!(projection.aspect(), 1.0);
		assert!(projection.matrix().iter().all(|v| v.is_finite()));
	}

	#[test]
	fn test_nearly_superimposed_clip_planes_are_ignored() {
		let mut projection = Projection::default();
		projection.set_clip_planes(1e-8, 2e-8);
		assert_eq!(projection.clip_planes(), (0.1, 100.0));
		assert!(projection.matrix().iter().all(|v| v.is_finite()));
	}

	#[test]
	fn test_invalid_fov_is_ignored() {
		let mut projection = Projection::default();
		let before = projection.matrix();
		for fov in &[0.0, -10.0, 180.0, 270.0, std::f32::NAN] {
			projection.set_fov(*fov);
			assert_eq!(projection.fov(), 45.0);
		}
		assert_eq!(projection.matrix(), before);

		projection.set_fov(60.0);
		assert_eq!(projection.fov(), 60.0);
	}

	#[test]
	fn test_resize_rebuilds_matrix() {
		let mut projection = Projection::new(100.0, 100.0);
		let square = projection.matrix();
		projection.resize(200.0, 100.0);

		assert_eq!(projection.size(), (200.0, 100.0));
		assert_ne!(projection.matrix(), square);
		// Only the horizontal scale depends on the aspect ratio
		assert!((projection.matrix()[(0, 0)] - square[(0, 0)] / 2.0).abs() < 1e-6);
		assert_eq!(projection.matrix()[(1, 1)], square[(1, 1)]);
	}

	#[test]
	fn test_fov_defaults_to_45_degrees() {
		let projection = Projection::default();
		assert_eq!(projection.fov(), 45.0);
		assert_eq!(projection.clip_planes(), (0.1, 100.0));

		let expected = 1.0 / (45.0f32.to_radians() / 2.0).tan();
		assert!((projection.matrix()[(1, 1)] - expected).abs() < 1e-5);
	}

	#[test]
	fn test_invalid_clip_planes_are_ignored() {
		let mut projection = Projection::default();
		projection.set_clip_planes(1.0, 1.0);
		assert_eq!(projection.clip_planes(), (0.1, 100.0));

		projection.set_clip_planes(0.5, 50.0);
		assert_eq!(projection.clip_planes(), (0.5, 50.0));
	}
}
