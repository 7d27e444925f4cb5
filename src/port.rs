// src/port.rs
//
// Read-only view over a backend's port descriptor.
//
// Platform backends (termios, Win32 DCB, ...) own the descriptor: they create
// it, fill in the parameter indices and flip the open flag. This module only
// reads it, either through the `PortView` trait implemented on the backend's
// own type, or through the plain `PortDescriptor` record backends may embed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::Result;
use crate::params::{Baud, DataBits, Dtr, FlowControl, Parity, Rts, StopBits};
use crate::tlog_trace;

/// Upper bound on the length of a rendered summary, in bytes.
pub const SUMMARY_MAX_LEN: usize = 511;

/// Rendered in a summary for a field holding an out-of-range index.
const NO_MAPPING: &str = "(null)";

// ============================================================================
// Port View
// ============================================================================

/// Read-only projection of a port descriptor.
///
/// Every getter returns the raw stored field. Parameter fields are expected
/// to hold valid indices into their domain; nothing here re-validates them.
pub trait PortView {
    fn device(&self) -> &str;
    fn baud(&self) -> u32;
    fn data(&self) -> u32;
    fn parity(&self) -> u32;
    fn stop(&self) -> u32;
    fn flow(&self) -> u32;
    fn dtr(&self) -> u32;
    fn rts(&self) -> u32;
    fn is_open(&self) -> bool;
}

// ============================================================================
// Line Settings
// ============================================================================

/// Typed bundle of all line parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSettings {
    pub baud: Baud,
    pub data: DataBits,
    pub parity: Parity,
    pub stop: StopBits,
    pub flow: FlowControl,
    pub dtr: Dtr,
    pub rts: Rts,
}

impl LineSettings {
    /// Read the typed settings back out of any descriptor view.
    /// Fails on the first field holding an out-of-range index.
    pub fn from_view<P: PortView + ?Sized>(port: &P) -> Result<Self> {
        Ok(Self {
            baud: Baud::try_from(port.baud())?,
            data: DataBits::try_from(port.data())?,
            parity: Parity::try_from(port.parity())?,
            stop: StopBits::try_from(port.stop())?,
            flow: FlowControl::try_from(port.flow())?,
            dtr: Dtr::try_from(port.dtr())?,
            rts: Rts::try_from(port.rts())?,
        })
    }
}

/// Compact `9600 8N1` notation.
impl fmt::Display for LineSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}{}",
            self.baud.rate(),
            self.data.bits(),
            self.parity.letter(),
            self.stop.bits()
        )
    }
}

// ============================================================================
// Port Descriptor
// ============================================================================

/// Backend-agnostic descriptor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescriptor {
    pub device: String,
    pub baud: u32,
    pub data: u32,
    pub parity: u32,
    pub stop: u32,
    pub flow: u32,
    pub dtr: u32,
    pub rts: u32,
    /// Set by the backend once the device handle is live
    #[serde(default)]
    pub open: bool,
}

impl PortDescriptor {
    /// A closed descriptor for `device` configured with `settings`.
    pub fn new(device: impl Into<String>, settings: &LineSettings) -> Self {
        Self {
            device: device.into(),
            baud: settings.baud.index(),
            data: settings.data.index(),
            parity: settings.parity.index(),
            stop: settings.stop.index(),
            flow: settings.flow.index(),
            dtr: settings.dtr.index(),
            rts: settings.rts.index(),
            open: false,
        }
    }

    pub fn settings(&self) -> Result<LineSettings> {
        LineSettings::from_view(self)
    }
}

impl PortView for PortDescriptor {
    fn device(&self) -> &str {
        tlog_trace!("[rs232] device: {}", self.device);
        &self.device
    }

    fn baud(&self) -> u32 {
        tlog_trace!("[rs232] baud: {}", self.baud);
        self.baud
    }

    fn data(&self) -> u32 {
        tlog_trace!("[rs232] data: {}", self.data);
        self.data
    }

    fn parity(&self) -> u32 {
        tlog_trace!("[rs232] parity: {}", self.parity);
        self.parity
    }

    fn stop(&self) -> u32 {
        tlog_trace!("[rs232] stop: {}", self.stop);
        self.stop
    }

    fn flow(&self) -> u32 {
        tlog_trace!("[rs232] flow: {}", self.flow);
        self.flow
    }

    fn dtr(&self) -> u32 {
        tlog_trace!("[rs232] dtr: {}", self.dtr);
        self.dtr
    }

    fn rts(&self) -> u32 {
        tlog_trace!("[rs232] rts: {}", self.rts);
        self.rts
    }

    fn is_open(&self) -> bool {
        tlog_trace!("[rs232] open: {}", self.open);
        self.open
    }
}

// ============================================================================
// Summary
// ============================================================================

/// One-line description of the port's configuration.
///
/// `device: /dev/ttyS0, baud: 9600, data bits: 8, parity: none, stop bits: 1, flow control: off`
///
/// DTR and RTS are not part of the line. The result is capped at
/// `SUMMARY_MAX_LEN` bytes, cut on a character boundary.
pub fn summary<P: PortView + ?Sized>(port: &P) -> String {
    let mut line = format!(
        "device: {}, baud: {}, data bits: {}, parity: {}, stop bits: {}, flow control: {}",
        port.device(),
        codec::baud_str(port.baud()).unwrap_or(NO_MAPPING),
        codec::data_str(port.data()).unwrap_or(NO_MAPPING),
        codec::parity_str(port.parity()).unwrap_or(NO_MAPPING),
        codec::stop_str(port.stop()).unwrap_or(NO_MAPPING),
        codec::flow_str(port.flow()).unwrap_or(NO_MAPPING),
    );
    truncate_on_char_boundary(&mut line, SUMMARY_MAX_LEN);
    line
}

/// `summary` for a descriptor that may be absent.
pub fn summary_of(port: Option<&dyn PortView>) -> Option<String> {
    port.map(summary)
}

fn truncate_on_char_boundary(s: &mut String, max_len: usize) {
    if s.len() <= max_len {
        return;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn ttys0() -> PortDescriptor {
        PortDescriptor::new("/dev/ttyS0", &LineSettings::default())
    }

    /// A backend type that keeps its own field layout.
    struct FakeBackendPort {
        path: String,
        fields: [u32; 7],
    }

    impl PortView for FakeBackendPort {
        fn device(&self) -> &str {
            &self.path
        }
        fn baud(&self) -> u32 {
            self.fields[0]
        }
        fn data(&self) -> u32 {
            self.fields[1]
        }
        fn parity(&self) -> u32 {
            self.fields[2]
        }
        fn stop(&self) -> u32 {
            self.fields[3]
        }
        fn flow(&self) -> u32 {
            self.fields[4]
        }
        fn dtr(&self) -> u32 {
            self.fields[5]
        }
        fn rts(&self) -> u32 {
            self.fields[6]
        }
        fn is_open(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_summary_default_port() {
        assert_eq!(
            summary(&ttys0()),
            "device: /dev/ttyS0, baud: 9600, data bits: 8, parity: none, stop bits: 1, flow control: off"
        );
    }

    #[test]
    fn test_summary_of_absent_port() {
        assert_eq!(summary_of(None), None);
        let port = ttys0();
        assert_eq!(summary_of(Some(&port)), Some(summary(&port)));
    }

    #[test]
    fn test_summary_out_of_range_field() {
        let mut port = ttys0();
        port.parity = Parity::MAX;
        assert!(summary(&port).contains("parity: (null),"));
    }

    #[test]
    fn test_summary_truncated() {
        let device = "é".repeat(400);
        let port = PortDescriptor::new(device, &LineSettings::default());
        let line = summary(&port);
        assert!(line.len() <= SUMMARY_MAX_LEN);
        assert!(line.starts_with("device: é"));
        assert!(!line.contains("flow control"));
    }

    #[test]
    fn test_summary_through_foreign_view() {
        let port = FakeBackendPort {
            path: "COM3".to_string(),
            fields: [
                Baud::B115200.index(),
                DataBits::Seven.index(),
                Parity::Even.index(),
                StopBits::Two.index(),
                FlowControl::Hardware.index(),
                Dtr::On.index(),
                Rts::On.index(),
            ],
        };
        assert_eq!(
            summary(&port),
            "device: COM3, baud: 115200, data bits: 7, parity: even, stop bits: 2, flow control: hardware"
        );
        let settings = LineSettings::from_view(&port).unwrap();
        assert_eq!(settings.dtr, Dtr::On);
        assert_eq!(settings.to_string(), "115200 7E2");
    }

    #[test]
    fn test_accessors_return_raw_fields() {
        let mut port = ttys0();
        port.open = true;
        port.rts = Rts::On.index();
        assert_eq!(port.device(), "/dev/ttyS0");
        assert_eq!(PortView::baud(&port), Baud::B9600.index());
        assert_eq!(PortView::data(&port), DataBits::Eight.index());
        assert_eq!(PortView::parity(&port), Parity::None.index());
        assert_eq!(PortView::stop(&port), StopBits::One.index());
        assert_eq!(PortView::flow(&port), FlowControl::Off.index());
        assert_eq!(PortView::dtr(&port), Dtr::Off.index());
        assert_eq!(PortView::rts(&port), Rts::On.index());
        assert!(port.is_open());
    }

    #[test]
    fn test_settings_rejects_bad_index() {
        let mut port = ttys0();
        assert_eq!(port.settings(), Ok(LineSettings::default()));
        port.flow = 7;
        assert_eq!(
            port.settings(),
            Err(Error::IndexOutOfRange {
                domain: "flow control",
                index: 7,
            })
        );
    }

    #[test]
    fn test_line_settings_display() {
        assert_eq!(LineSettings::default().to_string(), "9600 8N1");
    }
}
