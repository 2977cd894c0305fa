use std::error::Error;
use std::path::Path;

pub type Rgba = [u8; 4];

/// RGBA8 image held in CPU memory, ready for upload or sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
	width: u32,
	height: u32,
	pixels: Vec<Rgba>,
}

impl Texture {
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
		let path = path.as_ref();
		log::debug!("Loading image: {}", path.display());
		let img = image::open(path)?.to_rgba8();
		let texture = Self::from_image(img);
		log::debug!("Loaded image: {} - {}x{}", path.display(), texture.width, texture.height);
		Ok(texture)
	}

	pub fn from_memory(bytes: &[u8]) -> Result<Self, Box<dyn Error>> {
		let img = image::load_from_memory(bytes)?.to_rgba8();
		Ok(Self::from_image(img))
	}

	fn from_image(img: image::RgbaImage) -> Self {
		let (width, height) = img.dimensions();
		let pixels = img.pixels().map(|p| p.0).collect();
		Self { width, height, pixels }
	}

	/// Two-colour checkerboard with square cells `cell` pixels wide.
	pub fn checkerboard(width: u32, height: u32, cell: u32, a: Rgba, b: Rgba) -> Self {
		let cell = cell.max(1);
		let mut pixels = Vec::with_capacity(pixel_count(width, height));
		for y in 0..height {
			for x in 0..width {
				let even = ((x / cell) + (y / cell)) % 2 == 0;
				pixels.push(if even { a } else { b });
			}
		}
		Self { width, height, pixels }
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn as_bytes(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(|p| p.iter().copied()).collect()
	}

	pub fn get_pixel(&self, x: u32, y: u32) -> Option<&Rgba> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.pixels.get((y * self.width + x) as usize)
	}

	/// Nearest texel at normalized coordinates, `None` for an empty texture.
	pub fn sample(&self, u: f32, v: f32) -> Option<Rgba> {
		if self.width == 0 || self.height == 0 {
			return None;
		}

		// Clamp to edges
		let u = u.max(0.0).min(1.0);
		let v = v.max(0.0).min(1.0);

		let x = (u * (self.width - 1) as f32).round() as u32;
		let y = (v * (self.height - 1) as f32).round() as u32;
		self.get_pixel(x, y).copied()
	}
}

fn pixel_count(width: u32, height: u32) -> usize {
	width as usize * height as usize
}
