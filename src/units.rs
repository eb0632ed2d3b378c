//! Physical quantities used by the sweep model, each tagged with its own unit.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Frequency in Hz.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Frequency(f64);

impl Frequency {
    pub const fn from_hz(hz: f64) -> Frequency {
        Frequency(hz)
    }

    pub fn from_khz(khz: f64) -> Frequency {
        Frequency(khz * 1.0e3)
    }

    pub fn from_mhz(mhz: f64) -> Frequency {
        Frequency(mhz * 1.0e6)
    }

    pub fn from_ghz(ghz: f64) -> Frequency {
        Frequency(ghz * 1.0e9)
    }

    pub const fn hz(self) -> f64 {
        self.0
    }

    pub fn min(self, other: Frequency) -> Frequency {
        if other < self { other } else { self }
    }

    pub fn max(self, other: Frequency) -> Frequency {
        if other > self { other } else { self }
    }

    /// Unlike `f64::clamp`, never panics, and maps NaN to `low`.
    pub fn clamp(self, low: Frequency, high: Frequency) -> Frequency {
        if !(self >= low) {
            low
        } else if self > high {
            high
        } else {
            self
        }
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Frequency::from_hz({})", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let magnitude = self.0.abs();
        if magnitude >= 1.0e9 {
            write!(f, "{:.6} GHz", self.0 / 1.0e9)
        } else if magnitude >= 1.0e6 {
            write!(f, "{:.6} MHz", self.0 / 1.0e6)
        } else if magnitude >= 1.0e3 {
            write!(f, "{:.3} kHz", self.0 / 1.0e3)
        } else {
            write!(f, "{:.3} Hz", self.0)
        }
    }
}

impl Add for Frequency {
    type Output = Frequency;

    fn add(self, rhs: Frequency) -> Frequency {
        Frequency(self.0 + rhs.0)
    }
}

impl Sub for Frequency {
    type Output = Frequency;

    fn sub(self, rhs: Frequency) -> Frequency {
        Frequency(self.0 - rhs.0)
    }
}

impl AddAssign for Frequency {
    fn add_assign(&mut self, rhs: Frequency) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Frequency {
    fn sub_assign(&mut self, rhs: Frequency) {
        self.0 -= rhs.0;
    }
}

impl Mul<f64> for Frequency {
    type Output = Frequency;

    fn mul(self, rhs: f64) -> Frequency {
        Frequency(self.0 * rhs)
    }
}

impl Div<f64> for Frequency {
    type Output = Frequency;

    fn div(self, rhs: f64) -> Frequency {
        Frequency(self.0 / rhs)
    }
}

impl Div for Frequency {
    type Output = f64;

    fn div(self, rhs: Frequency) -> f64 {
        self.0 / rhs.0
    }
}

/// Reference impedance for conversions between power and voltage.
const IMPEDANCE_OHMS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmplitudeUnits {
    #[default]
    DBm,
    DBmV,
    DBuV,
    /// Linear, in millivolts.
    MV,
}

impl AmplitudeUnits {
    pub const ALL: [AmplitudeUnits; 4] = [Self::DBm, Self::DBmV, Self::DBuV, Self::MV];

    pub fn code(self) -> i64 {
        match self {
            Self::DBm  => 0,
            Self::DBmV => 1,
            Self::DBuV => 2,
            Self::MV   => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<AmplitudeUnits> {
        Self::ALL.into_iter().find(|units| units.code() == code)
    }

    pub fn is_log_scale(self) -> bool {
        !matches!(self, Self::MV)
    }
}

impl fmt::Display for AmplitudeUnits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::DBm  => "dBm",
            Self::DBmV => "dBmV",
            Self::DBuV => "dBuV",
            Self::MV   => "mV",
        })
    }
}

/// An amplitude in one of several logarithmic or linear units.
///
/// Two amplitudes compare equal only if both the value and the units match; use
/// [`Amplitude::to_dbm`] to compare the power they represent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amplitude {
    value: f64,
    units: AmplitudeUnits,
}

impl Default for Amplitude {
    fn default() -> Self {
        Amplitude::dbm(0.0)
    }
}

impl Amplitude {
    pub fn new(value: f64, units: AmplitudeUnits) -> Amplitude {
        Amplitude { value, units }
    }

    pub fn dbm(value: f64) -> Amplitude {
        Amplitude::new(value, AmplitudeUnits::DBm)
    }

    pub fn val(self) -> f64 {
        self.value
    }

    pub fn units(self) -> AmplitudeUnits {
        self.units
    }

    pub fn is_log_scale(self) -> bool {
        self.units.is_log_scale()
    }

    fn to_mv(self) -> f64 {
        match self.units {
            AmplitudeUnits::DBm => {
                let watts = 10f64.powf((self.value - 30.0) / 10.0);
                (watts * IMPEDANCE_OHMS).sqrt() * 1.0e3
            }
            AmplitudeUnits::DBmV => 10f64.powf(self.value / 20.0),
            AmplitudeUnits::DBuV => 10f64.powf((self.value - 60.0) / 20.0),
            AmplitudeUnits::MV   => self.value,
        }
    }

    fn from_mv(mv: f64, units: AmplitudeUnits) -> Amplitude {
        let value = match units {
            AmplitudeUnits::DBm => {
                // negative voltages have no power equivalent and produce NaN
                let volts = mv / 1.0e3;
                20.0 * (volts / IMPEDANCE_OHMS.sqrt()).log10() + 30.0
            }
            AmplitudeUnits::DBmV => 20.0 * mv.log10(),
            AmplitudeUnits::DBuV => 20.0 * mv.log10() + 60.0,
            AmplitudeUnits::MV   => mv,
        };
        Amplitude { value, units }
    }

    pub fn convert(self, units: AmplitudeUnits) -> Amplitude {
        if units == self.units {
            self
        } else if self.units == AmplitudeUnits::DBm && units.is_log_scale() {
            // dBmV and dBuV differ from dBm by a constant in a 50 ohm system
            let offset = Amplitude::dbm(0.0).convert_via_mv(units).value;
            Amplitude { value: self.value + offset, units }
        } else {
            self.convert_via_mv(units)
        }
    }

    fn convert_via_mv(self, units: AmplitudeUnits) -> Amplitude {
        Amplitude::from_mv(self.to_mv(), units)
    }

    pub fn to_dbm(self) -> f64 {
        self.convert(AmplitudeUnits::DBm).value
    }

    /// Limit the power represented by `self` to `low..=high`, keeping the units of `self`.
    ///
    /// Values that have no power equivalent (e.g. a negative linear amplitude) are clamped
    /// to `low`.
    pub fn clamp(self, low: Amplitude, high: Amplitude) -> Amplitude {
        let dbm = self.to_dbm();
        if !(dbm >= low.to_dbm()) {
            low.convert(self.units)
        } else if dbm > high.to_dbm() {
            high.convert(self.units)
        } else {
            self
        }
    }
}

impl fmt::Display for Amplitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.units)
    }
}

/// Adds to the value in its own units, i.e. a dB step for logarithmic amplitudes.
impl AddAssign<f64> for Amplitude {
    fn add_assign(&mut self, rhs: f64) {
        self.value += rhs;
    }
}

impl SubAssign<f64> for Amplitude {
    fn sub_assign(&mut self, rhs: f64) {
        self.value -= rhs;
    }
}

/// Duration in seconds.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Time(f64);

impl Time {
    pub const fn from_secs(secs: f64) -> Time {
        Time(secs)
    }

    pub fn from_millis(millis: f64) -> Time {
        Time(millis / 1.0e3)
    }

    pub const fn secs(self) -> f64 {
        self.0
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Time::from_secs({})", self.0)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 >= 1.0 {
            write!(f, "{:.3} s", self.0)
        } else if self.0 >= 1.0e-3 {
            write!(f, "{:.3} ms", self.0 * 1.0e3)
        } else {
            write!(f, "{:.3} us", self.0 * 1.0e6)
        }
    }
}
