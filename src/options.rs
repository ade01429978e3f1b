use crate::framebuffer::{self, Tonemap};

/// What a light contributes at a shaded point
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
	/// cosine between the light direction and the normal
	ObservedArea,
	/// incoming radiance only
	Radiance,
	/// material response only
	Brdf,
	/// radiance * BRDF * cosine
	Combined,
}

impl LightingMode {
	pub fn next(self) -> LightingMode {
		match self {
			LightingMode::ObservedArea => LightingMode::Radiance,
			LightingMode::Radiance => LightingMode::Brdf,
			LightingMode::Brdf => LightingMode::Combined,
			LightingMode::Combined => LightingMode::ObservedArea,
		}
	}
}

impl Default for LightingMode {
	fn default() -> LightingMode {
		LightingMode::Combined
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TonemapOperator {
	Clamp,
	MaxToOne,
}

impl TonemapOperator {
	pub fn function(self) -> Tonemap {
		match self {
			TonemapOperator::Clamp => framebuffer::clamp,
			TonemapOperator::MaxToOne => framebuffer::max_to_one,
		}
	}
}

impl Default for TonemapOperator {
	fn default() -> TonemapOperator {
		TonemapOperator::Clamp
	}
}

/// Per-render settings, passed explicitly to `render`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
	pub width: usize,
	pub height: usize,
	pub lighting_mode: LightingMode,
	pub shadows: bool,
	pub tonemap: TonemapOperator,
}

impl RenderOptions {
	pub fn toggle_shadows(&mut self) {
		self.shadows = !self.shadows;
	}

	pub fn cycle_lighting_mode(&mut self) {
		self.lighting_mode = self.lighting_mode.next();
	}
}

impl Default for RenderOptions {
	fn default() -> RenderOptions {
		RenderOptions {
			width: 640,
			height: 480,
			lighting_mode: LightingMode::default(),
			shadows: true,
			tonemap: TonemapOperator::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lighting_modes_cycle() {
		let start = LightingMode::ObservedArea;
		let mut m = start;
		let mut seen = Vec::new();
		for _ in 0..4 {
			seen.push(m);
			m = m.next();
		}
		assert_eq!(m, start);
		assert_eq!(seen, vec![
			LightingMode::ObservedArea,
			LightingMode::Radiance,
			LightingMode::Brdf,
			LightingMode::Combined,
		]);
	}

	#[test]
	fn defaults() {
		let o = RenderOptions::default();
		assert_eq!((o.width, o.height), (640, 480));
		assert_eq!(o.lighting_mode, LightingMode::Combined);
		assert!(o.shadows);
		assert_eq!(o.tonemap, TonemapOperator::Clamp);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let o: RenderOptions = serde_json::from_str(r#"{ "width": 32, "lighting_mode": "observed_area", "shadows": false }"#).unwrap();
		assert_eq!(o.width, 32);
		assert_eq!(o.height, 480);
		assert_eq!(o.lighting_mode, LightingMode::ObservedArea);
		assert!(!o.shadows);
	}

	#[test]
	fn toggles() {
		let mut o = RenderOptions::default();
		o.toggle_shadows();
		o.cycle_lighting_mode();
		assert!(!o.shadows);
		assert_eq!(o.lighting_mode, LightingMode::ObservedArea);
	}
}
