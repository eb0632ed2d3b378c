//! Bandwidth and span selection rules of the analyzer.
//!
//! Continuous bandwidths follow a 1-3-10 sequence and spans a 1-2-5 sequence; native
//! bandwidths are restricted to `NATIVE_RBW_LUT`.

use crate::{Capabilities, Frequency, NATIVE_RBW_LUT};

/// Automatic RBW is the widest bandwidth that fits this many times into the span.
const AUTO_RBW_SPAN_RATIO: f64 = 32.0;
/// A manually chosen RBW must be at most half the span...
const MIN_SPAN_TO_RBW: f64 = 2.0;
/// ...and yield no more than this many bins across the span.
const MAX_SPAN_TO_RBW: f64 = 100_000.0;

const BW_MANTISSAS: [f64; 2] = [1.0, 3.0];
const SPAN_MANTISSAS: [f64; 3] = [1.0, 2.0, 5.0];

// relative tolerance for recognizing a value that is already on a sequence
const EPSILON: f64 = 1e-9;

fn decade_candidates(value: f64, mantissas: &'static [f64]) -> impl Iterator<Item = f64> {
    // NaN casts to 0, which is still a valid starting decade
    let exponent = value.log10().floor() as i32;
    (exponent - 1..=exponent + 1)
        .flat_map(move |exp| mantissas.iter().map(move |&m| decade_value(m, exp)))
}

fn decade_value(mantissa: f64, exponent: i32) -> f64 {
    // dividing keeps e.g. 0.3 exact, where `3.0 * 0.1` would not be
    if exponent >= 0 {
        mantissa * 10f64.powi(exponent)
    } else {
        mantissa / 10f64.powi(-exponent)
    }
}

/// Largest value of the sequence that is not above `value`.
fn decade_floor(value: f64, mantissas: &'static [f64]) -> f64 {
    decade_candidates(value, mantissas)
        .filter(|&candidate| candidate <= value * (1.0 + EPSILON))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Next value of the sequence strictly above (or below) `value`.
fn decade_next(value: f64, mantissas: &'static [f64], up: bool) -> f64 {
    let candidates = decade_candidates(value, mantissas);
    if up {
        candidates
            .filter(|&candidate| candidate > value * (1.0 + EPSILON))
            .fold(f64::INFINITY, f64::min)
    } else {
        candidates
            .filter(|&candidate| candidate < value * (1.0 - EPSILON))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

fn bandwidth_range(caps: &Capabilities, native: bool) -> (Frequency, Frequency) {
    if native {
        (NATIVE_RBW_LUT[0], NATIVE_RBW_LUT[NATIVE_RBW_LUT.len() - 1])
    } else {
        (caps.min_rbw, caps.max_rbw)
    }
}

/// Index of the native bandwidth closest to `bw` on a logarithmic scale.
pub fn native_bw_index(bw: Frequency) -> usize {
    let octaves = (bw / NATIVE_RBW_LUT[0]).log2().round();
    if !(octaves >= 0.0) {
        0
    } else {
        (octaves as usize).min(NATIVE_RBW_LUT.len() - 1)
    }
}

/// The RBW chosen automatically for `span`.
pub fn best_rbw(caps: &Capabilities, span: Frequency, native: bool) -> Frequency {
    let target = span / AUTO_RBW_SPAN_RATIO;
    if native {
        NATIVE_RBW_LUT.iter()
            .rev()
            .copied()
            .find(|&bw| bw <= target)
            .unwrap_or(NATIVE_RBW_LUT[0])
    } else {
        Frequency::from_hz(decade_floor(target.hz(), &BW_MANTISSAS))
            .clamp(caps.min_rbw, caps.max_rbw)
    }
}

/// Keep a user-chosen `rbw` if it is still usable with `span`; otherwise move it to the nearest
/// usable bandwidth.
pub fn adjust_rbw_on_span(caps: &Capabilities, rbw: Frequency, span: Frequency, native: bool)
        -> Frequency {
    let (min_bw, max_bw) = bandwidth_range(caps, native);
    let low = (span / MAX_SPAN_TO_RBW).max(min_bw);
    let high = (span / MIN_SPAN_TO_RBW).min(max_bw);
    let adjusted = rbw.clamp(low, high);
    if native {
        NATIVE_RBW_LUT[native_bw_index(adjusted)]
    } else {
        adjusted
    }
}

/// The bandwidth one step above (or below) `bw`.
pub fn sequence_bw(caps: &Capabilities, bw: Frequency, native: bool, up: bool) -> Frequency {
    if native {
        let index = native_bw_index(bw);
        let index = if up {
            (index + 1).min(NATIVE_RBW_LUT.len() - 1)
        } else {
            index.saturating_sub(1)
        };
        NATIVE_RBW_LUT[index]
    } else {
        Frequency::from_hz(decade_next(bw.hz(), &BW_MANTISSAS, up))
            .clamp(caps.min_rbw, caps.max_rbw)
    }
}

/// The span one step above (or below) `span`. Device limits are applied by the caller.
pub fn sequence_span(span: Frequency, up: bool) -> Frequency {
    Frequency::from_hz(decade_next(span.hz(), &SPAN_MANTISSAS, up))
}
