// src/lib.rs
//
// rs232: line parameters, string codec and port descriptor view shared by
// the platform serial backends.
//
// Layout:
// - params  - parameter domains and their typed enums
// - codec   - index <-> string conversion on raw indices
// - error   - backend error code table and crate error type
// - port    - `PortView`, `PortDescriptor` and the one-line summary
// - config  - TOML/JSON port configuration
// - serial  - mapping onto the `serialport` crate
// - dump    - hex/ASCII diagnostic dumps
// - logging - `tlog!` / `tlog_trace!`

pub mod codec;
pub mod config;
pub mod dump;
pub mod error;
pub mod logging;
pub mod params;
pub mod port;
pub mod serial;

pub use config::PortConfig;
pub use error::{strerror, Error, ErrorCode, Result};
pub use params::{Baud, DataBits, Domain, Dtr, FlowControl, Parity, Rts, StopBits};
pub use port::{summary, summary_of, LineSettings, PortDescriptor, PortView};
