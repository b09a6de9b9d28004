// Copyright 2025 Irreducible Inc.

/// Returns early with the given error, converted with `Into`.
///
/// With the `bail_panic` feature enabled the macro panics instead, which makes the backtrace point
/// at the first constraint or witness check that failed.
#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}

#[cfg(test)]
mod tests {
	#[derive(Debug, PartialEq, Eq)]
	struct Failed(u32);

	impl std::fmt::Display for Failed {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			write!(f, "failed with {}", self.0)
		}
	}

	fn check_even(value: u32) -> Result<u32, Failed> {
		crate::ensure!(value % 2 == 0, Failed(value));
		Ok(value / 2)
	}

	#[test]
	fn test_ensure_passes_through() {
		assert_eq!(check_even(8), Ok(4));
	}

	#[cfg(not(feature = "bail_panic"))]
	#[test]
	fn test_ensure_returns_error() {
		assert_eq!(check_even(7), Err(Failed(7)));
	}
}
