//! User-facing parameters and solver tolerances.
//!
//! - `Params`: output `scale` and `straightness` weight, validated on construction.
//! - `SolveCfg`: rank tolerance and refinement budget for the solve.

use crate::error::LincaError;

/// Default straightness weight (direction fidelity vs. exact length).
pub const DEFAULT_STRAIGHTNESS: f64 = 10.0;
/// Default output scale.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Parameters consumed by the pipeline.
///
/// Invariants: `scale` is finite and `> 0`; `straightness` is finite and `>= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    scale: f64,
    straightness: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            straightness: DEFAULT_STRAIGHTNESS,
        }
    }
}

impl Params {
    pub fn new(scale: f64, straightness: f64) -> Result<Self, LincaError> {
        Ok(Self {
            scale: check_scale(scale)?,
            straightness: check_straightness(straightness)?,
        })
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn straightness(&self) -> f64 {
        self.straightness
    }

    pub fn with_scale(self, scale: f64) -> Result<Self, LincaError> {
        Ok(Self {
            scale: check_scale(scale)?,
            ..self
        })
    }

    pub fn with_straightness(self, straightness: f64) -> Result<Self, LincaError> {
        Ok(Self {
            straightness: check_straightness(straightness)?,
            ..self
        })
    }
}

/// Parse a `scale` value from text (command line, config file).
pub fn parse_scale(raw: &str) -> Result<f64, LincaError> {
    check_scale(parse_real("scale", raw)?)
}

/// Parse a `straightness` value from text.
pub fn parse_straightness(raw: &str) -> Result<f64, LincaError> {
    check_straightness(parse_real("straightness", raw)?)
}

fn parse_real(name: &'static str, raw: &str) -> Result<f64, LincaError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| LincaError::invalid(name, format!("`{raw}` is not a real number ({e})")))
}

fn check_scale(scale: f64) -> Result<f64, LincaError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(LincaError::invalid(
            "scale",
            format!("must be a positive finite number, got {scale}"),
        ));
    }
    Ok(scale)
}

fn check_straightness(straightness: f64) -> Result<f64, LincaError> {
    if !straightness.is_finite() || straightness < 0.0 {
        return Err(LincaError::invalid(
            "straightness",
            format!("must be a finite number >= 0, got {straightness}"),
        ));
    }
    Ok(straightness)
}

/// Solver tolerances.
#[derive(Clone, Copy, Debug)]
pub struct SolveCfg {
    /// Reject a length-only system (`straightness == 0`) when some pivot
    /// falls below this fraction of its diagonal entry, `Lᵢᵢ² / (AᵗA)ᵢᵢ`.
    pub pivot_tol: f64,
    /// Upper bound on residual refinement steps after the first solve.
    pub refine_steps: usize,
}

impl Default for SolveCfg {
    fn default() -> Self {
        Self {
            pivot_tol: 1e-10,
            refine_steps: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let p = Params::default();
        assert_eq!(p.scale(), 1.0);
        assert_eq!(p.straightness(), 10.0);
    }

    #[test]
    fn parse_accepts_reals_and_rejects_garbage() {
        assert_eq!(parse_scale("2.5").unwrap(), 2.5);
        assert_eq!(parse_straightness(" 0 ").unwrap(), 0.0);
        assert!(matches!(
            parse_scale("abc"),
            Err(LincaError::InvalidParameter { name: "scale", .. })
        ));
        assert!(matches!(
            parse_straightness("1e"),
            Err(LincaError::InvalidParameter {
                name: "straightness",
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Params::new(0.0, 10.0).is_err());
        assert!(Params::new(-1.0, 10.0).is_err());
        assert!(Params::new(f64::NAN, 10.0).is_err());
        assert!(Params::new(1.0, -0.5).is_err());
        assert!(Params::new(1.0, f64::INFINITY).is_err());
        assert!(parse_scale("inf").is_err());
        let p = Params::default().with_straightness(0.0).unwrap();
        assert_eq!(p.straightness(), 0.0);
        assert_eq!(p.with_scale(3.0).unwrap().scale(), 3.0);
    }
}
