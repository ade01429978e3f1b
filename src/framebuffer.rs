use std::path::Path;

use crate::math::*;

/// Maps an accumulated color to a displayable one in `[0, 1]`
pub type Tonemap = fn(Vec3) -> Vec3;

/// Cap each channel at 1 independently
pub fn clamp(c: Vec3) -> Vec3 {
	c.map(|v| v.max(0.0).min(1.0))
}

/// Divide by the largest channel when it exceeds 1, keeping the hue
pub fn max_to_one(c: Vec3) -> Vec3 {
	let c = c.map(|v| v.max(0.0));
	let m = c.max_elem();
	if m > 1.0 { c / m } else { c }
}

/// Round a `[0, 1]` color to 8 bits per channel
pub fn quantize(c: Vec3) -> [u8; 3] {
	let v = c.map(|x| x * 255.0 + 0.5);
	[v.x as u8, v.y as u8, v.z as u8]
}

/// Tightly packed 8-bit RGB image, rows from top to bottom
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
	width: usize,
	height: usize,
	pixels: Vec<u8>,
}

impl FrameBuffer {
	pub fn new(width: usize, height: usize) -> FrameBuffer {
		FrameBuffer { width, height, pixels: vec![0; width * height * 3] }
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn height(&self) -> usize {
		self.height
	}

	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	pub fn pixels_mut(&mut self) -> &mut [u8] {
		&mut self.pixels
	}

	pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
		let i = 3 * (y * self.width + x);
		[self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
	}

	pub fn set(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
		let i = 3 * (y * self.width + x);
		self.pixels[i..i + 3].copy_from_slice(&rgb);
	}

	/// Write the buffer as an uncompressed 24-bit BMP
	pub fn save_bmp<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
		info!("Saving {}x{} image to {}", self.width, self.height, path.as_ref().display());
		image::save_buffer_with_format(
			path,
			&self.pixels,
			self.width as u32,
			self.height as u32,
			image::ColorType::Rgb8,
			image::ImageFormat::Bmp,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamp_is_per_channel() {
		assert_eq!(clamp(Vec3::new(2.0, 0.5, -1.0)), Vec3::new(1.0, 0.5, 0.0));
	}

	#[test]
	fn max_to_one_keeps_ratios() {
		assert_eq!(max_to_one(Vec3::new(4.0, 2.0, 1.0)), Vec3::new(1.0, 0.5, 0.25));
		assert_eq!(max_to_one(Vec3::new(0.5, 0.2, 0.0)), Vec3::new(0.5, 0.2, 0.0));
	}

	#[test]
	fn quantize_rounds() {
		assert_eq!(quantize(Vec3::new(0.0, 1.0, 0.5)), [0, 255, 128]);
		assert_eq!(quantize(Vec3::thrice(1.0 / 255.0 * 0.49)), [0, 0, 0]);
	}

	#[test]
	fn set_and_get() {
		let mut fb = FrameBuffer::new(3, 2);
		fb.set(2, 1, [1, 2, 3]);
		assert_eq!(fb.get(2, 1), [1, 2, 3]);
		assert_eq!(&fb.pixels()[15..18], &[1, 2, 3]);
		assert_eq!(fb.get(0, 0), [0, 0, 0]);
	}

	#[test]
	fn saves_a_bmp_file() {
		let mut fb = FrameBuffer::new(4, 3);
		fb.set(1, 1, [255, 128, 0]);
		let path = std::env::temp_dir().join(format!("raylight-test-{}.bmp", std::process::id()));
		fb.save_bmp(&path).unwrap();
		let bytes = std::fs::read(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(&bytes[0..2], b"BM");
	}
}
