//! Environment-driven defaults, parsed once per process

use std::str::FromStr;
use std::sync::OnceLock;

use image::Rgb;

/// Default overlay color for `draw` (red)
pub const DEFAULT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// How a negative area radicand is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaPolicy {
    /// Clamp rounding noise to zero, fail with `DegenerateGeometry` otherwise
    #[default]
    Strict,
    /// Always clamp a negative radicand to zero
    Clamp,
}

impl FromStr for AreaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(AreaPolicy::Strict),
            "clamp" => Ok(AreaPolicy::Clamp),
            other => Err(format!("unknown area policy '{other}'")),
        }
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
}

static AREA_POLICY: OnceLock<AreaPolicy> = OnceLock::new();

/// Area policy from `SCV_BARCODE_AREA_POLICY` (`strict` | `clamp`)
pub fn area_policy() -> AreaPolicy {
    *AREA_POLICY.get_or_init(|| {
        let policy = parse_env::<AreaPolicy>("SCV_BARCODE_AREA_POLICY").unwrap_or_default();
        tracing::debug!(?policy, "area policy resolved");
        policy
    })
}

static AREA_EPSILON: OnceLock<f64> = OnceLock::new();

/// Relative tolerance for treating a negative radicand as rounding noise
pub fn area_epsilon() -> f64 {
    *AREA_EPSILON.get_or_init(|| {
        parse_env::<f64>("SCV_BARCODE_AREA_EPSILON")
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(1e-6)
    })
}

static DRAW_WIDTH: OnceLock<i32> = OnceLock::new();

/// Default line width for `draw`; negative means filled
pub fn draw_width() -> i32 {
    *DRAW_WIDTH.get_or_init(|| parse_env::<i32>("SCV_BARCODE_DRAW_WIDTH").unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_policy_parse() {
        assert_eq!("strict".parse::<AreaPolicy>(), Ok(AreaPolicy::Strict));
        assert_eq!(" Clamp ".parse::<AreaPolicy>(), Ok(AreaPolicy::Clamp));
        assert!("lenient".parse::<AreaPolicy>().is_err());
        assert_eq!(AreaPolicy::default(), AreaPolicy::Strict);
    }

    #[test]
    fn test_defaults_are_sane() {
        assert!(area_epsilon() >= 0.0);
        assert_ne!(draw_width(), 0);
        assert_eq!(DEFAULT_COLOR, Rgb([255, 0, 0]));
    }
}
