//! Limits imposed by the analyzer hardware, in terms of physical quantities.

use crate::{Error, Frequency, Result};

/// Resolution bandwidths the BB60 realizes natively, i.e. without resampling the FFT output.
/// Each entry is twice the previous one.
pub const NATIVE_RBW_LUT: [Frequency; 26] = [
    Frequency::from_hz(0.301003456),
    Frequency::from_hz(0.602006912),
    Frequency::from_hz(1.204013824),
    Frequency::from_hz(2.408027648),
    Frequency::from_hz(4.816055296),
    Frequency::from_hz(9.632110592),
    Frequency::from_hz(19.264221184),
    Frequency::from_hz(38.528442368),
    Frequency::from_hz(77.056884736),
    Frequency::from_hz(154.113769472),
    Frequency::from_hz(308.227538944),
    Frequency::from_hz(616.455077888),
    Frequency::from_hz(1232.910155776),
    Frequency::from_hz(2465.820311552),
    Frequency::from_hz(4931.640623104),
    Frequency::from_hz(9863.281246208),
    Frequency::from_hz(19726.562492416),
    Frequency::from_hz(39453.124984832),
    Frequency::from_hz(78906.249969664),
    Frequency::from_hz(157812.499939328),
    Frequency::from_hz(315624.999878656),
    Frequency::from_hz(631249.999757312),
    Frequency::from_hz(1262499.999514624),
    Frequency::from_hz(2524999.999029248),
    Frequency::from_hz(5049999.998058496),
    Frequency::from_hz(10099999.996116992),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capabilities {
    pub min_freq: Frequency,
    pub max_freq: Frequency,
    /// Narrowest span any mode accepts.
    pub min_span: Frequency,
    /// Span window of real-time and time-gated acquisition.
    pub min_rt_span: Frequency,
    pub max_rt_span: Frequency,
    /// RBW window of real-time acquisition.
    pub min_rt_rbw: Frequency,
    pub max_rt_rbw: Frequency,
    /// RBW window when the bandwidth is not restricted to native values.
    pub min_rbw: Frequency,
    pub max_rbw: Frequency,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::bb60a()
    }
}

impl Capabilities {
    pub fn bb60a() -> Capabilities {
        Capabilities {
            min_freq: Frequency::from_hz(9.0e3),
            max_freq: Frequency::from_hz(6.4e9),
            min_span: Frequency::from_hz(20.0),
            min_rt_span: Frequency::from_hz(200.0e3),
            max_rt_span: Frequency::from_hz(20.0e6),
            min_rt_rbw: Frequency::from_hz(2465.0),
            max_rt_rbw: Frequency::from_hz(631250.0),
            min_rbw: Frequency::from_hz(0.1),
            max_rbw: Frequency::from_hz(6.0e6),
        }
    }

    pub fn bb60c() -> Capabilities {
        Capabilities {
            max_rt_span: Frequency::from_hz(27.0e6),
            ..Capabilities::bb60a()
        }
    }

    /// Replace the widest real-time span, as discovered when the device is opened.
    pub fn with_max_real_time_span(self, max_rt_span: Frequency) -> Result<Capabilities> {
        if !(max_rt_span >= self.min_rt_span) || max_rt_span > self.max_freq - self.min_freq {
            return Err(Error::InvalidRealTimeSpan(max_rt_span))
        }
        Ok(Capabilities { max_rt_span, ..self })
    }

    pub fn with_frequency_range(self, min_freq: Frequency, max_freq: Frequency)
            -> Result<Capabilities> {
        // must leave room for a center that `set_center` accepts
        if !(min_freq >= Frequency::default()) || !(max_freq - min_freq > self.min_span * 4.0) {
            return Err(Error::InvalidFrequencyRange(min_freq, max_freq))
        }
        Ok(Capabilities { min_freq, max_freq, ..self })
    }

    pub fn with_real_time_rbw(self, min_rt_rbw: Frequency, max_rt_rbw: Frequency) -> Capabilities {
        Capabilities { min_rt_rbw, max_rt_rbw, ..self }
    }

    pub fn full_span(&self) -> Frequency {
        self.max_freq - self.min_freq
    }
}
