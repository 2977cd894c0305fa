use flexi_logger::{colored_default_format, Logger};
use flycam::{Camera, Direction, FrameClock, FrameInput, FreeCamera, Projection, Rgba, Texture};
use nalgebra as na;
use pixels::{wgpu::Surface, Pixels, SurfaceTexture};
use std::error::Error;
use std::time::Instant;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

const CLEAR_COLOR: Rgba = [255, 128, 0, 255];
const CUBE_COLOR: Rgba = [255, 255, 255, 255];
const GROUND_HEIGHT: f32 = -0.5;
const GROUND_EXTENT: f32 = 4.0;
const GROUND_SAMPLES: u32 = 160;

const KEY_BINDINGS: [(VirtualKeyCode, Direction); 6] = [
	(VirtualKeyCode::W, Direction::Forward),
	(VirtualKeyCode::S, Direction::Backward),
	(VirtualKeyCode::A, Direction::Left),
	(VirtualKeyCode::D, Direction::Right),
	(VirtualKeyCode::Space, Direction::Up),
	(VirtualKeyCode::LShift, Direction::Down),
];

const CUBE_EDGES: [(usize, usize); 12] = [
	(0, 1),
	(1, 3),
	(3, 2),
	(2, 0),
	(4, 5),
	(5, 7),
	(7, 6),
	(6, 4),
	(0, 4),
	(1, 5),
	(2, 6),
	(3, 7),
];

/// Colour and depth targets the scene is rasterized into.
struct Frame {
	width: u32,
	height: u32,
	color: Vec<Rgba>,
	depth: Vec<f32>,
}

impl Frame {
	fn new(width: u32, height: u32) -> Self {
		let len = width as usize * height as usize;
		Self {
			width,
			height,
			color: vec![CLEAR_COLOR; len],
			depth: vec![std::f32::INFINITY; len],
		}
	}

	fn clear(&mut self) {
		for p in self.color.iter_mut() {
			*p = CLEAR_COLOR;
		}
		for d in self.depth.iter_mut() {
			*d = std::f32::INFINITY;
		}
	}

	// Clip space to pixel coordinates, keeping NDC depth in z
	fn project(&self, view_projection: &na::Matrix4<f32>, p: &na::Point3<f32>) -> Option<na::Point3<f32>> {
		let clip = view_projection * p.to_homogeneous();
		if clip.w <= 0.0 {
			return None;
		}
		let ndc = clip.xyz() / clip.w;
		if ndc.z < -1.0 || ndc.z > 1.0 {
			return None;
		}

		let (w, h) = (self.width as f32, self.height as f32);
		Some(na::Point3::new(
			(w * (ndc.x / 2.0 + 0.5)).round(),
			h - (h * (ndc.y / 2.0 + 0.5)).round() - 1.0,
			ndc.z,
		))
	}

	fn plot(&mut self, x: i32, y: i32, z: f32, color: Rgba) {
		if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
			return;
		}
		let idx = (y as u32 * self.width + x as u32) as usize;
		// If pixel is behind previously drawn pixel, then skip it
		if self.depth[idx] < z {
			return;
		}
		self.depth[idx] = z;
		self.color[idx] = color;
	}

	fn line(&mut self, a: &na::Point3<f32>, b: &na::Point3<f32>, color: Rgba) {
		let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).max(1.0) as i32;
		for i in 0..=steps {
			let p = a + (b - a) * (i as f32 / steps as f32);
			self.plot(p.x as i32, p.y as i32, p.z, color);
		}
	}

	fn copy_to(&self, frame: &mut [u8]) {
		for (dst, src) in frame.chunks_exact_mut(4).zip(self.color.iter()) {
			dst.copy_from_slice(src);
		}
	}
}

struct Scene {
	ground: Texture,
	started: Instant,
}

impl Scene {
	fn new(ground: Texture) -> Self {
		Self {
			ground,
			started: Instant::now(),
		}
	}

	fn render(&self, camera: &FreeCamera, frame: &mut Frame) {
		frame.clear();
		let view_projection = camera.view_projection();

		// Ground quad, drawn as a dense grid of texel samples
		for j in 0..GROUND_SAMPLES {
			for i in 0..GROUND_SAMPLES {
				let u = i as f32 / (GROUND_SAMPLES - 1) as f32;
				let v = j as f32 / (GROUND_SAMPLES - 1) as f32;
				let world = na::Point3::new(
					(u * 2.0 - 1.0) * GROUND_EXTENT,
					GROUND_HEIGHT,
					(v * 2.0 - 1.0) * GROUND_EXTENT,
				);
				if let (Some(p), Some(color)) = (frame.project(&view_projection, &world), self.ground.sample(u, v)) {
					frame.plot(p.x as i32, p.y as i32, p.z, color);
				}
			}
		}

		// Spinning wire cube at the origin
		let t = self.started.elapsed().as_secs_f32();
		let spin = na::Rotation3::from_euler_angles(t * 0.5, t, 0.0);
		let corners: Vec<Option<na::Point3<f32>>> = (0..8)
			.map(|i| {
				let corner = na::Point3::new(
					if i & 1 == 0 { -0.5 } else { 0.5 },
					if i & 2 == 0 { -0.5 } else { 0.5 },
					if i & 4 == 0 { -0.5 } else { 0.5 },
				);
				frame.project(&view_projection, &(spin * corner))
			})
			.collect();

		for (a, b) in CUBE_EDGES.iter() {
			if let (Some(a), Some(b)) = (&corners[*a], &corners[*b]) {
				frame.line(a, b, CUBE_COLOR);
			}
		}
	}
}

fn load_ground() -> Texture {
	let checkerboard = || Texture::checkerboard(64, 64, 8, [40, 40, 40, 255], [200, 200, 200, 255]);
	match std::env::args().nth(1) {
		Some(path) => match Texture::load(&path) {
			Ok(texture) => texture,
			Err(err) => {
				log::error!("Unable to load texture {}: {}", path, err);
				checkerboard()
			}
		},
		None => checkerboard(),
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	Logger::with_env_or_str("info").format(colored_default_format).start()?;

	let mut width = WIDTH;
	let mut height = HEIGHT;

	let event_loop = EventLoop::new();
	let mut input = WinitInputHelper::new();
	let window = {
		let size = LogicalSize::new(width as f64, height as f64);
		WindowBuilder::new()
			.with_title("flycam")
			.with_inner_size(size)
			.with_min_inner_size(size)
			.build(&event_loop)?
	};
	if let Err(err) = window.set_cursor_grab(true) {
		log::warn!("Unable to grab cursor: {}", err);
	}
	window.set_cursor_visible(false);

	let mut pixels = {
		let surface = Surface::create(&window);
		let surface_texture = SurfaceTexture::new(width, height, surface);
		Pixels::new(width, height, surface_texture)?
	};

	let scene = Scene::new(load_ground());
	let mut frame = Frame::new(width, height);
	let mut camera = FreeCamera::default().with_projection(Projection::new(width as f32, height as f32));
	let mut frame_input = FrameInput::new();
	let mut clock = FrameClock::new();

	event_loop.run(move |event, _, control_flow| {
		match &event {
			// Draw the current frame
			Event::RedrawRequested(_) => {
				scene.render(&camera, &mut frame);
				frame.copy_to(pixels.get_frame());
				if let Err(err) = pixels.render() {
					log::error!("Render failed: {:?}", err);
					*control_flow = ControlFlow::Exit;
					return;
				}
			}
			// Mouse look. The camera up vector points down, which rolls the view half a
			// turn, so horizontal motion is mirrored to keep the drag direction natural.
			Event::DeviceEvent {
				event: DeviceEvent::MouseMotion { delta },
				..
			} => {
				frame_input.look(-delta.0 as f32, delta.1 as f32);
			}
			_ => {}
		}

		// Handle input events
		if input.update(&event) {
			// Close events
			if input.key_pressed(VirtualKeyCode::Escape) || input.quit() {
				*control_flow = ControlFlow::Exit;
				return;
			}

			// Resize the window
			if let Some(size) = input.window_resized() {
				width = size.width;
				height = size.height;
				pixels = {
					let surface = Surface::create(&window);
					let surface_texture = SurfaceTexture::new(width, height, surface);
					match Pixels::new(width, height, surface_texture) {
						Ok(pixels) => pixels,
						Err(err) => {
							log::error!("Unable to resize surface: {:?}", err);
							*control_flow = ControlFlow::Exit;
							return;
						}
					}
				};
				frame = Frame::new(width, height);
				camera.projection.resize(width as f32, height as f32);
				log::debug!("Resized to {}x{}", width, height);
			}

			for (key, direction) in KEY_BINDINGS.iter() {
				if input.key_held(*key) {
					frame_input.push(*direction);
				}
			}

			// Update the camera and request a redraw
			let delta = clock.tick();
			frame_input.apply(&mut camera, delta);
			frame_input.clear();
			window.request_redraw();
		}
	});
}
