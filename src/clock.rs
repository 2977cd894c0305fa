use std::time::Instant;

/// Measures the wall-clock time between frame starts.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
	last: Instant,
}

impl Default for FrameClock {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameClock {
	pub fn new() -> Self {
		Self::starting_at(Instant::now())
	}

	pub fn starting_at(start: Instant) -> Self {
		Self { last: start }
	}

	/// Seconds elapsed since the previous tick.
	pub fn tick(&mut self) -> f32 {
		self.tick_at(Instant::now())
	}

	pub fn tick_at(&mut self, now: Instant) -> f32 {
		// An instant earlier than the last frame counts as no time passing
		let delta = now.saturating_duration_since(self.last).as_secs_f32();
		if now > self.last {
			self.last = now;
		}
		delta
	}
}
