//! Scientific functions and angle units

use crate::core::operations::check_finite;
use crate::core::{CalcError, CalcResult, OperatorKind};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Angle unit governing trig input/output conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// 360 per turn
    #[default]
    Degrees,
    /// 2π per turn
    Radians,
    /// 400 per turn
    Gradians,
}

impl AngleUnit {
    /// Next unit in the DEG → RAD → GRAD cycle
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Gradians,
            Self::Gradians => Self::Degrees,
        }
    }

    /// Indicator label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Degrees => "DEG",
            Self::Radians => "RAD",
            Self::Gradians => "GRAD",
        }
    }

    /// Converts an angle in this unit to radians
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle * PI / 180.0,
            Self::Radians => angle,
            Self::Gradians => angle * PI / 200.0,
        }
    }

    /// Converts radians to an angle in this unit
    #[must_use]
    pub fn radians_to_unit(self, radians: f64) -> f64 {
        match self {
            Self::Degrees => radians * 180.0 / PI,
            Self::Radians => radians,
            Self::Gradians => radians * 200.0 / PI,
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AngleUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degrees" => Ok(Self::Degrees),
            "rad" | "radians" => Ok(Self::Radians),
            "grad" | "gradians" => Ok(Self::Gradians),
            _ => Err(CalcError::UnknownToken(s.to_string())),
        }
    }
}

/// Scientific function keys
///
/// Each key has a primary meaning and a shifted (inverse) one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    /// sin / sin⁻¹
    Sin,
    /// cos / cos⁻¹
    Cos,
    /// tan / tan⁻¹
    Tan,
    /// √x / x²
    Sqrt,
    /// x³ / ∛x
    Cube,
    /// ln / eˣ
    Ln,
    /// log / 10ˣ
    Log10,
    /// x² / √x
    Square,
    /// xʸ, which opens operator entry instead of computing
    Power,
}

impl FunctionKind {
    /// Keypad tag
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
            Self::Cube => "cube",
            Self::Ln => "ln",
            Self::Log10 => "log",
            Self::Square => "2nd",
            Self::Power => "xy",
        }
    }

    /// Operator this key enters instead of computing a value
    #[must_use]
    pub const fn delegated_operator(self) -> Option<OperatorKind> {
        match self {
            Self::Power => Some(OperatorKind::Power),
            _ => None,
        }
    }

    /// Evaluates the function on `x`
    ///
    /// Returns `None` for keys that drive operator entry rather than
    /// producing a value.
    #[must_use]
    pub fn evaluate(self, x: f64, shifted: bool, unit: AngleUnit) -> Option<CalcResult<f64>> {
        let result = match (self, shifted) {
            (Self::Sin, false) => Ok(unit.to_radians(x).sin()),
            (Self::Sin, true) => Ok(unit.radians_to_unit(x.asin())),
            (Self::Cos, false) => Ok(unit.to_radians(x).cos()),
            (Self::Cos, true) => Ok(unit.radians_to_unit(x.acos())),
            (Self::Tan, false) => Ok(unit.to_radians(x).tan()),
            (Self::Tan, true) => Ok(unit.radians_to_unit(x.atan())),
            (Self::Sqrt, false) | (Self::Square, true) => square_root(x),
            (Self::Sqrt, true) | (Self::Square, false) => Ok(x * x),
            (Self::Cube, false) => Ok(x * x * x),
            (Self::Cube, true) => {
                if x < 0.0 {
                    Err(CalcError::NegativeRadicand)
                } else {
                    Ok(x.cbrt())
                }
            }
            (Self::Ln, _) | (Self::Log10, _) if x <= 0.0 => Err(CalcError::NonPositiveLogArgument),
            (Self::Ln, false) => Ok(x.ln()),
            (Self::Ln, true) => Ok(x.exp()),
            (Self::Log10, false) => Ok(x.log10()),
            (Self::Log10, true) => Ok(10f64.powf(x)),
            (Self::Power, _) => return None,
        };
        Some(result.and_then(check_finite))
    }
}

fn square_root(x: f64) -> CalcResult<f64> {
    if x < 0.0 {
        Err(CalcError::NegativeRadicand)
    } else {
        Ok(x.sqrt())
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FunctionKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sin" => Ok(Self::Sin),
            "cos" => Ok(Self::Cos),
            "tan" => Ok(Self::Tan),
            "sqrt" => Ok(Self::Sqrt),
            "cube" => Ok(Self::Cube),
            "ln" => Ok(Self::Ln),
            "log" => Ok(Self::Log10),
            "2nd" | "square" => Ok(Self::Square),
            "xy" => Ok(Self::Power),
            other => Err(CalcError::UnknownToken(other.to_string())),
        }
    }
}
