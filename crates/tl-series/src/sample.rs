//! Raw logger samples.

use core::fmt;

use chrono::NaiveDateTime;
use tl_core::{AdcCode, Channel, Real};

/// Where a sample sits in the run. Carried through untouched; nothing in the
/// processing path reasons about time.
#[derive(Clone, Debug, PartialEq)]
pub enum TimeMarker {
    /// Row ordinal, for logs without a time column
    Index(u64),
    /// Seconds since logging started
    Elapsed(Real),
    Timestamp(NaiveDateTime),
}

impl fmt::Display for TimeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeMarker::Index(i) => write!(f, "{i}"),
            TimeMarker::Elapsed(s) => write!(f, "{s}"),
            TimeMarker::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// One raw reading: a time marker and zero or more channel codes.
///
/// An absent channel (not wired, or not logged) and a channel that was logged
/// as empty are both `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub time: TimeMarker,
    codes: [Option<AdcCode>; Channel::COUNT],
}

impl Sample {
    pub fn new(time: TimeMarker) -> Self {
        Self {
            time,
            codes: [None; Channel::COUNT],
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, channel: Channel, code: AdcCode) -> Self {
        self.set(channel, Some(code));
        self
    }

    pub fn set(&mut self, channel: Channel, code: Option<AdcCode>) {
        self.codes[channel.index()] = code;
    }

    #[inline]
    pub fn code(&self, channel: Channel) -> Option<AdcCode> {
        self.codes[channel.index()]
    }

    /// Channels that carry a code, in channel order.
    pub fn present_channels(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL
            .into_iter()
            .filter(move |c| self.codes[c.index()].is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_channels() {
        let s = Sample::new(TimeMarker::Index(3))
            .with(Channel::FluidIn, 512)
            .with(Channel::POut, 200);
        assert_eq!(s.code(Channel::FluidIn), Some(512));
        assert_eq!(s.code(Channel::POut), Some(200));
        assert_eq!(s.code(Channel::T1), None);
        let present: Vec<_> = s.present_channels().collect();
        assert_eq!(present, vec![Channel::FluidIn, Channel::POut]);
    }

    #[test]
    fn clearing_a_channel() {
        let mut s = Sample::new(TimeMarker::Elapsed(0.1)).with(Channel::T2, 10);
        s.set(Channel::T2, None);
        assert_eq!(s.code(Channel::T2), None);
    }

    #[test]
    fn time_marker_display() {
        assert_eq!(TimeMarker::Index(7).to_string(), "7");
        assert_eq!(TimeMarker::Elapsed(1.25).to_string(), "1.25");
        let ts = NaiveDateTime::parse_from_str("2025-06-01T12:30:05", "%Y-%m-%dT%H:%M:%S").unwrap();
        assert_eq!(TimeMarker::Timestamp(ts).to_string(), "2025-06-01T12:30:05");
    }
}
