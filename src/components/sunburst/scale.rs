//! Continuous scales mapping layout coordinates onto screen space.

/// Linear interpolation between two numbers.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Component-wise linear interpolation of a `[start, end]` pair.
pub fn lerp_pair(a: [f64; 2], b: [f64; 2], t: f64) -> [f64; 2] {
	[lerp(a[0], b[0], t), lerp(a[1], b[1], t)]
}

// Position of `v` inside `[d0, d1]`, 0 when the domain is empty.
fn normalize(v: f64, d0: f64, d1: f64) -> f64 {
	let span = d1 - d0;
	if span == 0.0 { 0.0 } else { (v - d0) / span }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	pub domain: [f64; 2],
	pub range: [f64; 2],
}

impl LinearScale {
	pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
		Self { domain, range }
	}

	pub fn apply(&self, v: f64) -> f64 {
		let t = normalize(v, self.domain[0], self.domain[1]);
		lerp(self.range[0], self.range[1], t)
	}
}

fn signed_sqrt(v: f64) -> f64 {
	if v < 0.0 { -(-v).sqrt() } else { v.sqrt() }
}

/// Square-root scale: the range is linear in `sqrt(v)`, so ring areas rather
/// than ring widths grow with the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
	pub domain: [f64; 2],
	pub range: [f64; 2],
}

impl SqrtScale {
	pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
		Self { domain, range }
	}

	pub fn apply(&self, v: f64) -> f64 {
		let t = normalize(
			signed_sqrt(v),
			signed_sqrt(self.domain[0]),
			signed_sqrt(self.domain[1]),
		);
		lerp(self.range[0], self.range[1], t)
	}
}
