const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Formats a byte count the way file browsers do: `"919 B"`, `"  5 KB"`,
/// falling back to one decimal of terabytes.
pub fn readable_size(bytes: f64) -> String {
	let mut size = bytes;
	for unit in UNITS {
		if size < 1024.0 {
			return format!("{size:3.0} {unit}");
		}
		size /= 1024.0;
	}
	format!("{size:3.1}TB")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn picks_largest_unit_below_1024() {
		assert_eq!(readable_size(0.0), "  0 B");
		assert_eq!(readable_size(919.0), "919 B");
		assert_eq!(readable_size(5575.0), "  5 KB");
		assert_eq!(readable_size(3.0 * 1024.0 * 1024.0), "  3 MB");
		assert_eq!(readable_size(1023.0 * 1024.0 * 1024.0 * 1024.0), "1023 GB");
	}

	#[test]
	fn terabytes_keep_one_decimal() {
		let tb = 1024.0_f64.powi(4);
		assert_eq!(readable_size(2.5 * tb), "2.5TB");
	}
}
