mod units;
mod hardware;
mod bandwidth;
mod store;
mod settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    InvalidRealTimeSpan(Frequency),
    InvalidFrequencyRange(Frequency, Frequency),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidRealTimeSpan(span) =>
                write!(f, "maximum real-time span of {} is out of range", span),
            Self::InvalidFrequencyRange(min, max) =>
                write!(f, "frequency range {}..{} is empty", min, max),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> =
    core::result::Result<T, Error>;

pub use units::{
    Frequency,
    Amplitude,
    AmplitudeUnits,
    Time,
};

pub use hardware::{
    Capabilities,
    NATIVE_RBW_LUT,
};

pub use bandwidth::{
    best_rbw,
    adjust_rbw_on_span,
    sequence_bw,
    sequence_span,
    native_bw_index,
};

pub use store::{
    Value,
    SettingsStore,
    MemorySettings,
};

pub use settings::{
    Observer,
    Mode,
    Detector,
    ProcessingUnits,
    Changes,
    SweepSettings,
};
