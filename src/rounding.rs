use serde::{Serialize, Deserialize};

use std::fmt;

// Ceil {{{1
/// Rounding granularity for construction weights.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum Ceil {
    Ton,
    #[default]
    HalfTon,
    QuarterTon,
    TenthTon,
    Kilo,
}

impl Ceil { // {{{2
    /// Steps per ton.
    pub fn mult(&self) -> f64 {
        match self {
            Self::Ton        => 1.0,
            Self::HalfTon    => 2.0,
            Self::QuarterTon => 4.0,
            Self::TenthTon   => 10.0,
            Self::Kilo       => 1000.0,
        }
    }
}

impl fmt::Display for Ceil { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Ton        => "ton",
            Self::HalfTon    => "half ton",
            Self::QuarterTon => "quarter ton",
            Self::TenthTon   => "tenth ton",
            Self::Kilo       => "kilogram",
        })
    }
}

// Functions {{{1
/// Scaled values this close to a whole step are treated as on the step.
const SNAP: f64 = 1e-6;

// snap {{{2
fn snap(scaled: f64) -> f64 {
    let r = scaled.round();
    if (scaled - r).abs() < SNAP { r } else { scaled }
}

// ceil {{{2
/// Round up to the next step of the given granularity.
///
pub fn ceil(value: f64, kind: Ceil) -> f64 {
    snap(value * kind.mult()).ceil() / kind.mult()
}

// ceil_max_half {{{2
/// Round up, but never coarser than a half ton.
///
pub fn ceil_max_half(value: f64, kind: Ceil) -> f64 {
    match kind {
        Ceil::Ton => ceil(value, Ceil::HalfTon),
        _         => ceil(value, kind),
    }
}

// floor {{{2
/// Round down to the previous step of the given granularity.
///
pub fn floor(value: f64, kind: Ceil) -> f64 {
    snap(value * kind.mult()).floor() / kind.mult()
}

// round {{{2
/// Round to the nearest step, halves away from zero.
///
pub fn round(value: f64, kind: Ceil) -> f64 {
    snap(value * kind.mult()).round() / kind.mult()
}
