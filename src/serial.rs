// src/serial.rs
//
// Bridge between rs232 line parameters and the `serialport` crate.
// Provides type conversions both ways, an unopened port builder, and port
// enumeration. Opening the device and all I/O stay with the caller.

use serde::Serialize;
use serialport::{
    DataBits as SpDataBits, FlowControl as SpFlowControl, Parity as SpParity,
    StopBits as SpStopBits,
};

use crate::error::{Error, Result};
use crate::params::{Baud, DataBits, FlowControl, Parity, StopBits};
use crate::port::{LineSettings, PortDescriptor};
use crate::tlog_trace;

// ============================================================================
// Conversion Functions
// ============================================================================

impl From<DataBits> for SpDataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Five => SpDataBits::Five,
            DataBits::Six => SpDataBits::Six,
            DataBits::Seven => SpDataBits::Seven,
            DataBits::Eight => SpDataBits::Eight,
        }
    }
}

impl From<SpDataBits> for DataBits {
    fn from(bits: SpDataBits) -> Self {
        match bits {
            SpDataBits::Five => DataBits::Five,
            SpDataBits::Six => DataBits::Six,
            SpDataBits::Seven => DataBits::Seven,
            SpDataBits::Eight => DataBits::Eight,
        }
    }
}

impl From<Parity> for SpParity {
    fn from(p: Parity) -> Self {
        match p {
            Parity::None => SpParity::None,
            Parity::Odd => SpParity::Odd,
            Parity::Even => SpParity::Even,
        }
    }
}

impl From<SpParity> for Parity {
    fn from(p: SpParity) -> Self {
        match p {
            SpParity::None => Parity::None,
            SpParity::Odd => Parity::Odd,
            SpParity::Even => Parity::Even,
        }
    }
}

impl From<StopBits> for SpStopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => SpStopBits::One,
            StopBits::Two => SpStopBits::Two,
        }
    }
}

impl From<SpStopBits> for StopBits {
    fn from(bits: SpStopBits) -> Self {
        match bits {
            SpStopBits::One => StopBits::One,
            SpStopBits::Two => StopBits::Two,
        }
    }
}

impl From<FlowControl> for SpFlowControl {
    fn from(flow: FlowControl) -> Self {
        match flow {
            FlowControl::Off => SpFlowControl::None,
            FlowControl::Hardware => SpFlowControl::Hardware,
            FlowControl::XonXoff => SpFlowControl::Software,
        }
    }
}

impl From<SpFlowControl> for FlowControl {
    fn from(flow: SpFlowControl) -> Self {
        match flow {
            SpFlowControl::None => FlowControl::Off,
            SpFlowControl::Hardware => FlowControl::Hardware,
            SpFlowControl::Software => FlowControl::XonXoff,
        }
    }
}

impl From<serialport::Error> for Error {
    fn from(e: serialport::Error) -> Self {
        Error::Io(e.to_string())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Unopened `serialport` builder configured from `settings`.
///
/// RTS has no open-time option in `serialport`; set it on the opened port
/// with `write_request_to_send`.
pub fn builder(device: &str, settings: &LineSettings) -> serialport::SerialPortBuilder {
    tlog_trace!("[serial] builder for {} ({})", device, settings);
    serialport::new(device, settings.baud.rate())
        .data_bits(settings.data.into())
        .parity(settings.parity.into())
        .stop_bits(settings.stop.into())
        .flow_control(settings.flow.into())
        .dtr_on_open(settings.dtr.is_on())
}

/// Builder for a descriptor's current configuration.
/// Fails if any parameter field holds an out-of-range index.
pub fn builder_for(port: &PortDescriptor) -> Result<serialport::SerialPortBuilder> {
    Ok(builder(&port.device, &port.settings()?))
}

/// Read an opened port's line settings back into an open descriptor.
///
/// Baud rates outside the supported table are reported as
/// `Error::UnrecognizedValue`. `serialport` cannot read the DTR/RTS output
/// lines back, so both are reported as `Off` whatever the port is driving.
pub fn descriptor_from_port(port: &dyn serialport::SerialPort) -> Result<PortDescriptor> {
    let device = port.name().unwrap_or_default();
    let rate = port.baud_rate()?;
    let baud = Baud::from_rate(rate).ok_or_else(|| Error::UnrecognizedValue {
        domain: Baud::domain().name(),
        input: rate.to_string(),
    })?;

    let settings = LineSettings {
        baud,
        data: port.data_bits()?.into(),
        parity: port.parity()?.into(),
        stop: port.stop_bits()?.into(),
        flow: port.flow_control()?.into(),
        ..LineSettings::default()
    };

    let mut descriptor = PortDescriptor::new(device, &settings);
    descriptor.open = true;
    Ok(descriptor)
}

// ============================================================================
// Port Enumeration
// ============================================================================

/// Information about an available serial device
#[derive(Clone, Debug, Serialize)]
pub struct DeviceInfo {
    pub port_name: String,
    pub port_type: String,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
}

/// List available serial devices.
///
/// On macOS, filters out /dev/tty.* devices and only shows /dev/cu.* devices.
/// The tty devices block on open waiting for carrier detect.
pub fn available_devices() -> Result<Vec<DeviceInfo>> {
    let ports = serialport::available_ports()?;

    Ok(ports
        .into_iter()
        .filter(|_p| {
            #[cfg(target_os = "macos")]
            {
                !_p.port_name.starts_with("/dev/tty.")
            }
            #[cfg(not(target_os = "macos"))]
            {
                true
            }
        })
        .map(|p| {
            let (port_type, manufacturer, product, vid, pid) = match p.port_type {
                serialport::SerialPortType::UsbPort(info) => (
                    "USB".to_string(),
                    info.manufacturer,
                    info.product,
                    Some(info.vid),
                    Some(info.pid),
                ),
                serialport::SerialPortType::BluetoothPort => {
                    ("Bluetooth".to_string(), None, None, None, None)
                }
                serialport::SerialPortType::PciPort => ("PCI".to_string(), None, None, None, None),
                serialport::SerialPortType::Unknown => {
                    ("Unknown".to_string(), None, None, None, None)
                }
            };
            DeviceInfo {
                port_name: p.port_name,
                port_type,
                manufacturer,
                product,
                vid,
                pid,
            }
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================
