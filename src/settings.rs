//! Sweep configuration of the analyzer, kept consistent with itself and with the hardware.
//!
//! Every mutator leaves the configuration valid: out of range requests are clamped or rejected,
//! never reported. After a mutation the registered observers are called with the complete new
//! configuration and the set of field groups that changed since the previous notification.

use std::fmt;

use bitflags::bitflags;

use crate::{Amplitude, AmplitudeUnits, Capabilities, Frequency, SettingsStore, Time};
use crate::{NATIVE_RBW_LUT, adjust_rbw_on_span, best_rbw, native_bw_index};
use crate::{sequence_bw, sequence_span};

const MIN_REF_LEVEL_DBM: f64 = -100.0;
const MAX_REF_LEVEL_DBM: f64 = 20.0;
const MIN_DIV: f64 = 0.1;
const MAX_DIV: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Sweeping,
    RealTime,
    TimeGate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detector {
    MinMax,
    #[default]
    Average,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingUnits {
    Log,
    Voltage,
    #[default]
    Power,
    Bypass,
}

// The codes are the ones used by the instrument API and stored in presets.
macro_rules! persisted_codes {
    ( $( $ty:ident { $( $variant:ident = $code:literal ),+ $(,)? } )+ ) => {
        $(
            impl $ty {
                pub const ALL: &'static [$ty] = &[ $( $ty::$variant ),+ ];

                pub fn code(self) -> i64 {
                    match self {
                        $( $ty::$variant => $code, )+
                    }
                }

                pub fn from_code(code: i64) -> Option<$ty> {
                    match code {
                        $( $code => Some($ty::$variant), )+
                        _ => None
                    }
                }
            }
        )+
    }
}

persisted_codes! {
    Mode { Sweeping = 0, RealTime = 1, TimeGate = 2 }
    Detector { MinMax = 0, Average = 1 }
    ProcessingUnits { Log = 0, Voltage = 1, Power = 2, Bypass = 3 }
}

bitflags! {
    /// Groups of fields touched by a mutation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Changes: u32 {
        const Mode          = 1<<0;
        /// Any of start, stop, center, span.
        const Frequency     = 1<<1;
        const Step          = 1<<2;
        /// Any of rbw, vbw and their auto/native flags.
        const Bandwidth     = 1<<3;
        /// Reference level or division.
        const Amplitude     = 1<<4;
        /// Attenuation or gain index.
        const Frontend      = 1<<5;
        /// Sweep time, detector, processing units, image rejection.
        const Acquisition   = 1<<6;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sweep {
    mode: Mode,

    start: Frequency,
    stop: Frequency,
    center: Frequency,
    span: Frequency,
    step: Frequency,
    rbw: Frequency,
    vbw: Frequency,

    auto_rbw: bool,
    auto_vbw: bool,
    native_rbw: bool,

    ref_level: Amplitude,
    div: f64,
    attenuation: i32,
    gain: i32,

    sweep_time: Time,
    processing_units: ProcessingUnits,
    detector: Detector,
    rejection: bool,
}

impl Default for Sweep {
    fn default() -> Self {
        let start = Frequency::from_mhz(11.0);
        let stop = Frequency::from_ghz(6.0);
        Sweep {
            mode: Mode::Sweeping,

            start,
            stop,
            center: (start + stop) / 2.0,
            span: stop - start,
            step: Frequency::from_mhz(20.0),
            rbw: Frequency::from_khz(300.0),
            vbw: Frequency::from_khz(300.0),

            auto_rbw: true,
            auto_vbw: true,
            native_rbw: false,

            ref_level: Amplitude::dbm(-30.0),
            div: 10.0,
            attenuation: 0,
            gain: 0,

            // standard sweep only; real-time sweep time is a user preference
            sweep_time: Time::from_millis(1.0),
            processing_units: ProcessingUnits::Power,
            detector: Detector::Average,
            rejection: false,
        }
    }
}

impl Sweep {
    fn changes_from(&self, before: &Sweep) -> Changes {
        let mut changes = Changes::empty();
        changes.set(Changes::Mode, self.mode != before.mode);
        changes.set(Changes::Frequency,
            (self.start, self.stop, self.center, self.span) !=
            (before.start, before.stop, before.center, before.span));
        changes.set(Changes::Step, self.step != before.step);
        changes.set(Changes::Bandwidth,
            (self.rbw, self.vbw, self.auto_rbw, self.auto_vbw, self.native_rbw) !=
            (before.rbw, before.vbw, before.auto_rbw, before.auto_vbw, before.native_rbw));
        changes.set(Changes::Amplitude,
            (self.ref_level, self.div) != (before.ref_level, before.div));
        changes.set(Changes::Frontend,
            (self.attenuation, self.gain) != (before.attenuation, before.gain));
        changes.set(Changes::Acquisition,
            (self.sweep_time, self.processing_units, self.detector, self.rejection) !=
            (before.sweep_time, before.processing_units, before.detector, before.rejection));
        changes
    }
}

fn clamp_f64(value: f64, low: f64, high: f64) -> f64 {
    if !(value >= low) {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

fn clamp_ref_level(ref_level: Amplitude) -> Amplitude {
    ref_level.clamp(Amplitude::dbm(MIN_REF_LEVEL_DBM), Amplitude::dbm(MAX_REF_LEVEL_DBM))
}

pub type Observer = Box<dyn FnMut(&SweepSettings, Changes) + Send>;

pub struct SweepSettings {
    sweep: Sweep,
    caps: Capabilities,
    pending: Changes,
    observers: Vec<Observer>,
}

impl Default for SweepSettings {
    fn default() -> Self {
        SweepSettings::new()
    }
}

/// Clones are silent snapshots, e.g. for comparing against a saved preset; observers are
/// not carried over.
impl Clone for SweepSettings {
    fn clone(&self) -> Self {
        SweepSettings {
            sweep: self.sweep,
            caps: self.caps,
            pending: Changes::empty(),
            observers: Vec::new(),
        }
    }
}

/// Compares every sweep parameter exactly. Capabilities and observers are not compared.
impl PartialEq for SweepSettings {
    fn eq(&self, other: &Self) -> bool {
        self.sweep == other.sweep
    }
}

impl fmt::Debug for SweepSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SweepSettings")
            .field("sweep", &self.sweep)
            .field("caps", &self.caps)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SweepSettings {
    pub fn new() -> SweepSettings {
        SweepSettings::with_capabilities(Capabilities::default())
    }

    pub fn with_capabilities(caps: Capabilities) -> SweepSettings {
        SweepSettings {
            sweep: Sweep::default(),
            caps,
            pending: Changes::empty(),
            observers: Vec::new(),
        }
    }

    /// Call `observer` after every notifying mutation.
    pub fn subscribe<F>(&mut self, observer: F)
            where F: FnMut(&SweepSettings, Changes) + Send + 'static {
        self.observers.push(Box::new(observer));
    }

    /// Deliver every change accumulated since the previous notification, even if there is
    /// none. Mutators call this themselves, except for `set_mode`.
    pub fn notify(&mut self) {
        let changes = std::mem::take(&mut self.pending);
        log::trace!("notify({:?}) to {} observers", changes, self.observers.len());
        // observers only see `&SweepSettings`, so they cannot subscribe during delivery
        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer(self, changes);
        }
        self.observers = observers;
    }

    fn record(&mut self, before: &Sweep) {
        self.pending |= self.sweep.changes_from(before);
    }

    fn emit(&mut self, before: &Sweep) {
        self.record(before);
        self.notify();
    }

    pub fn capabilities(&self) -> &Capabilities { &self.caps }

    pub fn mode(&self) -> Mode { self.sweep.mode }
    pub fn start(&self) -> Frequency { self.sweep.start }
    pub fn stop(&self) -> Frequency { self.sweep.stop }
    pub fn center(&self) -> Frequency { self.sweep.center }
    pub fn span(&self) -> Frequency { self.sweep.span }
    pub fn step(&self) -> Frequency { self.sweep.step }
    pub fn rbw(&self) -> Frequency { self.sweep.rbw }
    pub fn vbw(&self) -> Frequency { self.sweep.vbw }
    pub fn auto_rbw(&self) -> bool { self.sweep.auto_rbw }
    pub fn auto_vbw(&self) -> bool { self.sweep.auto_vbw }
    pub fn native_rbw(&self) -> bool { self.sweep.native_rbw }
    pub fn ref_level(&self) -> Amplitude { self.sweep.ref_level }
    pub fn div(&self) -> f64 { self.sweep.div }
    pub fn attenuation(&self) -> i32 { self.sweep.attenuation }
    pub fn gain(&self) -> i32 { self.sweep.gain }
    pub fn sweep_time(&self) -> Time { self.sweep.sweep_time }
    pub fn processing_units(&self) -> ProcessingUnits { self.sweep.processing_units }
    pub fn detector(&self) -> Detector { self.sweep.detector }
    pub fn rejection(&self) -> bool { self.sweep.rejection }

    pub fn is_average_power(&self) -> bool {
        self.sweep.detector == Detector::Average &&
            self.sweep.processing_units == ProcessingUnits::Power
    }

    /// Reset to the values used at program launch. Does not notify.
    pub fn load_defaults(&mut self) {
        let before = self.sweep;
        self.sweep = Sweep::default();
        self.record(&before);
    }

    /// Copy every parameter of `other` (e.g. a preset being applied), then notify.
    pub fn assign(&mut self, other: &SweepSettings) {
        let before = self.sweep;
        self.sweep = other.sweep;
        self.emit(&before);
    }

    /// Read every parameter from `store`, keeping the current value for keys that are missing
    /// or malformed, then notify once.
    ///
    /// Values that would break the invariants of the configuration (e.g. inverted edges) are
    /// repaired the same way the mutators would; anything written by [`Self::save`] is
    /// restored exactly.
    pub fn load<S: SettingsStore + ?Sized>(&mut self, store: &S) {
        let before = self.sweep;
        let current = self.sweep;
        let frequency = |key: &str, default: Frequency| {
            Frequency::from_hz(store.get_f64(key, default.hz()))
        };
        let index = |key: &str, default: i32| {
            i32::try_from(store.get_i64(key, default as i64)).unwrap_or(default)
        };

        let ref_level_units = AmplitudeUnits::from_code(
            store.get_i64("Sweep/RefLevelUnits", current.ref_level.units().code()))
            .unwrap_or(current.ref_level.units());
        let loaded = Sweep {
            mode: Mode::from_code(store.get_i64("Mode", current.mode.code()))
                .unwrap_or(current.mode),

            start: frequency("Sweep/Start", current.start),
            stop: frequency("Sweep/Stop", current.stop),
            center: frequency("Sweep/Center", current.center),
            span: frequency("Sweep/Span", current.span),
            step: frequency("Sweep/Step", current.step),
            rbw: frequency("Sweep/RBW", current.rbw),
            vbw: frequency("Sweep/VBW", current.vbw),

            auto_rbw: store.get_bool("Sweep/AutoRBW", current.auto_rbw),
            auto_vbw: store.get_bool("Sweep/AutoVBW", current.auto_vbw),
            native_rbw: store.get_bool("Sweep/NativeRBW", current.native_rbw),

            ref_level: Amplitude::new(
                store.get_f64("Sweep/RefLevel", current.ref_level.val()), ref_level_units),
            div: store.get_f64("Sweep/Division", current.div),
            attenuation: index("Sweep/Attenuation", current.attenuation),
            gain: index("Sweep/Gain", current.gain),

            sweep_time: Time::from_secs(
                store.get_f64("Sweep/SweepTime", current.sweep_time.secs())),
            processing_units: ProcessingUnits::from_code(
                store.get_i64("Sweep/ProcessingUnits", current.processing_units.code()))
                .unwrap_or(current.processing_units),
            detector: Detector::from_code(
                store.get_i64("Sweep/Detector", current.detector.code()))
                .unwrap_or(current.detector),
            rejection: store.get_bool("Sweep/Rejection", current.rejection),
        };

        self.sweep = loaded;
        self.repair(&current);
        self.emit(&before);
    }

    fn repair(&mut self, fallback: &Sweep) {
        let caps = self.caps;
        let sweep = &mut self.sweep;
        let (start, stop) = (sweep.start, sweep.stop);
        if !(start >= caps.min_freq && stop <= caps.max_freq && start < stop) {
            log::debug!("load: discarding edges {}..{}", start, stop);
            sweep.start = fallback.start;
            sweep.stop = fallback.stop;
        }
        if !(sweep.step > Frequency::default()) {
            sweep.step = fallback.step;
        }
        if !(sweep.rbw > Frequency::default()) {
            sweep.rbw = fallback.rbw;
        }
        if !(sweep.vbw > Frequency::default() && sweep.vbw <= sweep.rbw) {
            sweep.vbw = sweep.rbw;
        }
        sweep.ref_level = clamp_ref_level(sweep.ref_level);
        sweep.div = clamp_f64(sweep.div, MIN_DIV, MAX_DIV);
        let (start, stop) = (sweep.start, sweep.stop);
        self.set_edges(start, stop);
        // spans derived around a center may exceed the limit by rounding; leave those alone
        let limit = self.caps.max_rt_span + self.caps.min_span;
        if self.sweep.mode == Mode::RealTime && self.sweep.span > limit {
            self.fit_real_time_span();
        }
        // same restrictions as `auto_bandwidth_adjust`, without choosing a new rbw
        if self.sweep.mode == Mode::RealTime {
            let sweep = &mut self.sweep;
            sweep.native_rbw = true;
            sweep.rbw = sweep.rbw.clamp(self.caps.min_rt_rbw, self.caps.max_rt_rbw);
            sweep.vbw = sweep.rbw;
        }
    }

    pub fn save<S: SettingsStore + ?Sized>(&self, store: &mut S) {
        let sweep = &self.sweep;
        store.set_value("Mode", sweep.mode.code().into());

        store.set_value("Sweep/Start", sweep.start.hz().into());
        store.set_value("Sweep/Stop", sweep.stop.hz().into());
        store.set_value("Sweep/Center", sweep.center.hz().into());
        store.set_value("Sweep/Span", sweep.span.hz().into());
        store.set_value("Sweep/Step", sweep.step.hz().into());
        store.set_value("Sweep/RBW", sweep.rbw.hz().into());
        store.set_value("Sweep/VBW", sweep.vbw.hz().into());

        store.set_value("Sweep/AutoRBW", sweep.auto_rbw.into());
        store.set_value("Sweep/AutoVBW", sweep.auto_vbw.into());
        store.set_value("Sweep/NativeRBW", sweep.native_rbw.into());

        store.set_value("Sweep/RefLevel", sweep.ref_level.val().into());
        store.set_value("Sweep/RefLevelUnits", sweep.ref_level.units().code().into());
        store.set_value("Sweep/Division", sweep.div.into());
        store.set_value("Sweep/Attenuation", sweep.attenuation.into());
        store.set_value("Sweep/Gain", sweep.gain.into());

        store.set_value("Sweep/SweepTime", sweep.sweep_time.secs().into());
        store.set_value("Sweep/ProcessingUnits", sweep.processing_units.code().into());
        store.set_value("Sweep/Detector", sweep.detector.code().into());
        store.set_value("Sweep/Rejection", sweep.rejection.into());
    }

    /// Commit new edges, keeping them inside the device range, and derive center and span.
    fn set_edges(&mut self, start: Frequency, stop: Frequency) {
        let sweep = &mut self.sweep;
        sweep.start = start.max(self.caps.min_freq);
        sweep.stop = stop.min(self.caps.max_freq);
        sweep.span = sweep.stop - sweep.start;
        sweep.center = (sweep.start + sweep.stop) / 2.0;
    }

    /// Shrink the span around the current center to the widest real-time span.
    fn fit_real_time_span(&mut self) {
        if self.sweep.span > self.caps.max_rt_span {
            let center = self.sweep.center;
            let half_span = self.caps.max_rt_span / 2.0;
            log::debug!("shrinking span {} to {} around {}",
                        self.sweep.span, self.caps.max_rt_span, center);
            self.set_edges(center - half_span, center + half_span);
        }
    }

    /// Whether a span produced by moving one edge is acceptable in the current mode.
    fn edge_span_valid(&self, span: Frequency) -> bool {
        let caps = &self.caps;
        if !(span > caps.min_span) {
            return false
        }
        match self.sweep.mode {
            Mode::RealTime => span >= caps.min_rt_span && span <= caps.max_rt_span,
            Mode::Sweeping | Mode::TimeGate => true,
        }
    }

    /// Re-derive RBW and VBW after anything they depend on has changed. Does not notify.
    ///
    /// With `force`, RBW is chosen anew for the span even if the user picked it manually.
    pub fn auto_bandwidth_adjust(&mut self, force: bool) {
        let caps = self.caps;
        let sweep = &mut self.sweep;
        let real_time = sweep.mode == Mode::RealTime;

        // real-time acquisition only works with native bandwidths
        if real_time {
            sweep.native_rbw = true;
        }

        if sweep.auto_rbw || force {
            sweep.rbw = best_rbw(&caps, sweep.span, sweep.native_rbw);
        } else {
            sweep.rbw = adjust_rbw_on_span(&caps, sweep.rbw, sweep.span, sweep.native_rbw);
        }

        if sweep.auto_vbw || sweep.vbw > sweep.rbw || real_time {
            sweep.vbw = sweep.rbw;
        }

        if real_time {
            sweep.rbw = sweep.rbw.clamp(caps.min_rt_rbw, caps.max_rt_rbw);
            sweep.vbw = sweep.rbw;
        }
        log::trace!("auto_bandwidth_adjust({}): rbw={} vbw={}", force, sweep.rbw, sweep.vbw);
    }

    /// Switch the acquisition mode. Does not notify; call [`Self::notify`] once the
    /// configuration is complete.
    pub fn set_mode(&mut self, mode: Mode) {
        let before = self.sweep;
        log::debug!("set_mode({:?})", mode);
        self.sweep.mode = mode;

        if mode == Mode::RealTime {
            self.sweep.native_rbw = true;
            self.sweep.auto_rbw = true;
            self.sweep.auto_vbw = true;
            self.fit_real_time_span();
            self.auto_bandwidth_adjust(true);
        }
        self.record(&before);
    }

    /// Move the start frequency, keeping stop. Rejected if the resulting span is not valid.
    pub fn set_start(&mut self, f: Frequency) {
        let before = self.sweep;
        let start = f.clamp(self.caps.min_freq, self.caps.max_freq);
        if self.edge_span_valid(self.sweep.stop - start) {
            let stop = self.sweep.stop;
            self.set_edges(start, stop);
        } else {
            log::debug!("set_start({}) rejected", f);
        }

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    /// Move the stop frequency, keeping start. Rejected if the resulting span is not valid.
    pub fn set_stop(&mut self, f: Frequency) {
        let before = self.sweep;
        let stop = f.clamp(self.caps.min_freq, self.caps.max_freq);
        if self.edge_span_valid(stop - self.sweep.start) {
            let start = self.sweep.start;
            self.set_edges(start, stop);
        } else {
            log::debug!("set_stop({}) rejected", f);
        }

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    /// Move the center frequency, narrowing the span as needed to stay inside the device range.
    pub fn set_center(&mut self, f: Frequency) {
        let before = self.sweep;
        let caps = self.caps;
        let lowest = caps.min_freq + caps.min_span * 2.0;
        let highest = caps.max_freq - caps.min_span * 2.0;
        if f >= lowest && f <= highest {
            let span = self.sweep.span
                .min((f - caps.min_freq) * 2.0)
                .min((caps.max_freq - f) * 2.0);
            self.set_edges(f - span / 2.0, f + span / 2.0);
        } else {
            log::debug!("set_center({}) rejected", f);
        }

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    pub fn increase_center(&mut self, up: bool) {
        let step = self.sweep.step;
        if up {
            self.set_center(self.sweep.center + step)
        } else {
            self.set_center(self.sweep.center - step)
        }
    }

    /// Change the span around the current center. Near the ends of the device range the span
    /// is pinned to that end, so the realized center (and possibly span) can differ from
    /// the request.
    pub fn set_span(&mut self, f: Frequency) {
        let before = self.sweep;
        let caps = self.caps;
        let mut span = if f >= caps.min_span { f } else { caps.min_span };
        if matches!(self.sweep.mode, Mode::RealTime | Mode::TimeGate) {
            span = span.clamp(caps.min_rt_span, caps.max_rt_span);
        }

        let center = self.sweep.center;
        let (start, stop) =
            if center - span / 2.0 < caps.min_freq {
                (caps.min_freq, (caps.min_freq + span).min(caps.max_freq))
            } else if center + span / 2.0 > caps.max_freq {
                ((caps.max_freq - span).max(caps.min_freq), caps.max_freq)
            } else {
                (center - span / 2.0, center + span / 2.0)
            };
        self.set_edges(start, stop);

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    pub fn increase_span(&mut self, up: bool) {
        self.set_span(sequence_span(self.sweep.span, up))
    }

    /// Sweep the whole frequency range of the device (from the capabilities, not a fixed band),
    /// within the span limits of the mode.
    pub fn set_full_span(&mut self) {
        let before = self.sweep;
        self.set_edges(self.caps.min_freq, self.caps.max_freq);
        if matches!(self.sweep.mode, Mode::RealTime | Mode::TimeGate) {
            self.fit_real_time_span();
        }
        self.sweep.auto_rbw = true;
        self.sweep.auto_vbw = true;

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    /// Set the increment used by `increase_center`. Non-positive steps are ignored.
    pub fn set_step(&mut self, f: Frequency) {
        let before = self.sweep;
        if f > Frequency::default() {
            self.sweep.step = f;
        } else {
            log::debug!("set_step({}) rejected", f);
        }
        self.emit(&before);
    }

    pub fn set_rbw(&mut self, f: Frequency) {
        let before = self.sweep;
        self.sweep.rbw = if self.sweep.native_rbw {
            NATIVE_RBW_LUT[native_bw_index(f)]
        } else {
            f
        };
        self.sweep.auto_rbw = false;

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    /// Set a manual VBW, limited to `rbw`. Requests below `min_rbw` (including zero, negative
    /// and NaN) are raised to `min_rbw`, or to `rbw` if that is narrower.
    pub fn set_vbw(&mut self, f: Frequency) {
        let before = self.sweep;
        let rbw = self.sweep.rbw;
        self.sweep.vbw = f.clamp(self.caps.min_rbw.min(rbw), rbw);
        self.sweep.auto_vbw = false;

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    pub fn rbw_increase(&mut self, up: bool) {
        let before = self.sweep;
        self.sweep.rbw = sequence_bw(&self.caps, self.sweep.rbw, self.sweep.native_rbw, up);
        self.sweep.auto_rbw = false;

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    pub fn vbw_increase(&mut self, up: bool) {
        let before = self.sweep;
        let vbw = sequence_bw(&self.caps, self.sweep.vbw, self.sweep.native_rbw, up);
        self.sweep.vbw = vbw.min(self.sweep.rbw);
        self.sweep.auto_vbw = false;

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    pub fn set_auto_rbw(&mut self, auto: bool) {
        let before = self.sweep;
        self.sweep.auto_rbw = auto;

        self.auto_bandwidth_adjust(false);
        self.emit(&before);
    }

    pub fn set_auto_vbw(&mut self, auto: bool) {
        let before = self.sweep;
        self.sweep.auto_vbw = auto;
        if auto {
            self.sweep.vbw = self.sweep.rbw;
        }
        self.emit(&before);
    }

    pub fn set_native_rbw(&mut self, native: bool) {
        let before = self.sweep;
        self.sweep.native_rbw = native;
        self.sweep.auto_rbw = true;

        self.auto_bandwidth_adjust(true);
        self.emit(&before);
    }

    pub fn set_ref_level(&mut self, ref_level: Amplitude) {
        let before = self.sweep;
        self.sweep.ref_level = clamp_ref_level(ref_level);
        self.emit(&before);
    }

    /// Step the reference level by one division (logarithmic units) or by 20% (linear units).
    pub fn shift_ref_level(&mut self, up: bool) {
        let before = self.sweep;
        let mut ref_level = self.sweep.ref_level;
        if ref_level.is_log_scale() {
            if up { ref_level += self.sweep.div } else { ref_level -= self.sweep.div }
        } else {
            let factor = if up { 1.2 } else { 0.8 };
            ref_level = Amplitude::new(ref_level.val() * factor, AmplitudeUnits::MV);
        }
        self.sweep.ref_level = clamp_ref_level(ref_level);
        self.emit(&before);
    }

    pub fn set_div(&mut self, div: f64) {
        let before = self.sweep;
        self.sweep.div = clamp_f64(div, MIN_DIV, MAX_DIV);
        self.emit(&before);
    }

    /// Store an attenuation index; it is converted to a physical value when the device is
    /// configured.
    pub fn set_attenuation(&mut self, index: i32) {
        let before = self.sweep;
        self.sweep.attenuation = index;
        self.emit(&before);
    }

    /// Store a gain index; see `set_attenuation`.
    pub fn set_gain(&mut self, index: i32) {
        let before = self.sweep;
        self.sweep.gain = index;
        self.emit(&before);
    }

    pub fn set_sweep_time(&mut self, sweep_time: Time) {
        let before = self.sweep;
        self.sweep.sweep_time = sweep_time;
        self.emit(&before);
    }

    pub fn set_detector(&mut self, detector: Detector) {
        if self.sweep.detector != detector {
            let before = self.sweep;
            self.sweep.detector = detector;
            self.emit(&before);
        }
    }

    pub fn set_proc_units(&mut self, units: ProcessingUnits) {
        if self.sweep.processing_units != units {
            let before = self.sweep;
            self.sweep.processing_units = units;
            self.emit(&before);
        }
    }

    pub fn set_rejection(&mut self, rejection: bool) {
        if self.sweep.rejection != rejection {
            let before = self.sweep;
            self.sweep.rejection = rejection;
            self.emit(&before);
        }
    }
}
