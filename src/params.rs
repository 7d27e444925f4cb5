// src/params.rs
//
// Line parameter domains.
//
// Every configurable axis of a port (baud, data bits, parity, stop bits, flow
// control, DTR, RTS) is a fixed, ordered table of canonical strings. A value
// of that axis is its index into the table; the table length doubles as the
// "no such value" sentinel. The typed enums below sit on top of the raw
// indices and are what most callers should use.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

// ============================================================================
// Domain
// ============================================================================

/// One parameter domain: a name and its ordered canonical strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    name: &'static str,
    table: &'static [&'static str],
}

impl Domain {
    pub const fn new(name: &'static str, table: &'static [&'static str]) -> Self {
        Self { name, table }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn table(&self) -> &'static [&'static str] {
        self.table
    }

    /// Number of valid indices. Also the sentinel returned by `parse` on no match.
    pub const fn size(&self) -> u32 {
        self.table.len() as u32
    }

    pub const fn contains(&self, index: u32) -> bool {
        index < self.size()
    }

    /// Canonical string for `index`, or `None` when out of range.
    pub fn name_of(&self, index: u32) -> Option<&'static str> {
        self.table.get(index as usize).copied()
    }

    /// First index whose canonical string is a prefix of `text`, else `size()`.
    ///
    /// Matching is byte-literal and accepts trailing input: `"9600extra"`
    /// parses as 9600 in the baud domain.
    pub fn parse(&self, text: &str) -> u32 {
        self.table
            .iter()
            .position(|entry| text.as_bytes().starts_with(entry.as_bytes()))
            .map_or(self.size(), |i| i as u32)
    }

    /// `(index, canonical string)` pairs in index order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &'static str)> {
        self.table.iter().enumerate().map(|(i, s)| (i as u32, *s))
    }
}

// ============================================================================
// Tables
// ============================================================================

pub const BAUD: Domain = Domain::new(
    "baud",
    &["300", "2400", "4800", "9600", "19200", "38400", "57600", "115200", "460800"],
);

pub const DATA: Domain = Domain::new("data bits", &["5", "6", "7", "8"]);

pub const PARITY: Domain = Domain::new("parity", &["none", "odd", "even"]);

pub const STOP: Domain = Domain::new("stop bits", &["1", "2"]);

pub const FLOW: Domain = Domain::new("flow control", &["off", "hardware", "xon/xoff"]);

pub const DTR: Domain = Domain::new("dtr", &["off", "on"]);

pub const RTS: Domain = Domain::new("rts", &["off", "on"]);

/// Backend failure kinds. Lookup only; see `error::ErrorCode`.
pub const ERROR: Domain = Domain::new(
    "error",
    &[
        "no error",
        "unknown error",
        "open error",
        "close error",
        "flush error",
        "get/set settings error",
        "read error",
        "write error",
        "select error",
        "timeout error",
        "ioctl error",
        "port closed error",
    ],
);

/// The seven line-parameter domains, in descriptor field order.
pub const LINE_DOMAINS: [&Domain; 7] = [&BAUD, &DATA, &PARITY, &STOP, &FLOW, &DTR, &RTS];

// ============================================================================
// Typed Parameters
// ============================================================================

/// Generates a typed enum over a domain. Variant order must match the table.
macro_rules! line_param {
    (
        $(#[$meta:meta])*
        $name:ident over $domain:ident, default $default:ident {
            $($variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Sentinel one past the last valid index.
            pub const MAX: u32 = $domain.size();

            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn domain() -> &'static Domain {
                &$domain
            }

            pub const fn index(self) -> u32 {
                self as u32
            }

            pub fn from_index(index: u32) -> Option<Self> {
                Self::ALL.get(index as usize).copied()
            }

            pub fn as_str(self) -> &'static str {
                $domain.table[self as usize]
            }
        }

        const _: () = assert!($name::ALL.len() == $domain.table.len());

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_index($domain.parse(s)).ok_or_else(|| Error::UnrecognizedValue {
                    domain: $domain.name(),
                    input: s.to_string(),
                })
            }
        }

        impl TryFrom<u32> for $name {
            type Error = Error;

            fn try_from(index: u32) -> Result<Self, Self::Error> {
                Self::from_index(index).ok_or(Error::IndexOutOfRange {
                    domain: $domain.name(),
                    index,
                })
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value.index()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

line_param! {
    /// Supported baud rates.
    Baud over BAUD, default B9600 {
        B300, B2400, B4800, B9600, B19200, B38400, B57600, B115200, B460800,
    }
}

line_param! {
    /// Character size.
    DataBits over DATA, default Eight {
        Five, Six, Seven, Eight,
    }
}

line_param! {
    Parity over PARITY, default None {
        None, Odd, Even,
    }
}

line_param! {
    StopBits over STOP, default One {
        One, Two,
    }
}

line_param! {
    /// Flow control. `XonXoff` is software flow control.
    FlowControl over FLOW, default Off {
        Off, Hardware, XonXoff,
    }
}

line_param! {
    /// Requested DTR line state.
    Dtr over DTR, default Off {
        Off, On,
    }
}

line_param! {
    /// Requested RTS line state.
    Rts over RTS, default Off {
        Off, On,
    }
}

impl Baud {
    /// Bits per second.
    pub const fn rate(self) -> u32 {
        match self {
            Baud::B300 => 300,
            Baud::B2400 => 2400,
            Baud::B4800 => 4800,
            Baud::B9600 => 9600,
            Baud::B19200 => 19200,
            Baud::B38400 => 38400,
            Baud::B57600 => 57600,
            Baud::B115200 => 115200,
            Baud::B460800 => 460800,
        }
    }

    /// Exact rate lookup, for values coming from an OS query.
    pub fn from_rate(rate: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.rate() == rate)
    }
}

impl DataBits {
    pub const fn bits(self) -> u8 {
        match self {
            DataBits::Five => 5,
            DataBits::Six => 6,
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

impl StopBits {
    pub const fn bits(self) -> u8 {
        match self {
            StopBits::One => 1,
            StopBits::Two => 2,
        }
    }
}

impl Parity {
    /// Single-letter form used in `8N1` style notation.
    pub const fn letter(self) -> char {
        match self {
            Parity::None => 'N',
            Parity::Odd => 'O',
            Parity::Even => 'E',
        }
    }
}

impl Dtr {
    pub const fn is_on(self) -> bool {
        matches!(self, Dtr::On)
    }
}

impl From<bool> for Dtr {
    fn from(on: bool) -> Self {
        if on { Dtr::On } else { Dtr::Off }
    }
}

impl Rts {
    pub const fn is_on(self) -> bool {
        matches!(self, Rts::On)
    }
}

impl From<bool> for Rts {
    fn from(on: bool) -> Self {
        if on { Rts::On } else { Rts::Off }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_sizes() {
        assert_eq!(BAUD.size(), 9);
        assert_eq!(DATA.size(), 4);
        assert_eq!(PARITY.size(), 3);
        assert_eq!(STOP.size(), 2);
        assert_eq!(FLOW.size(), 3);
        assert_eq!(DTR.size(), 2);
        assert_eq!(RTS.size(), 2);
        assert_eq!(ERROR.size(), 12);
    }

    #[test]
    fn test_canonical_strings_unique() {
        for domain in LINE_DOMAINS.iter().copied().chain([&ERROR]) {
            let table = domain.table();
            for (i, a) in table.iter().enumerate() {
                for b in &table[i + 1..] {
                    assert_ne!(a, b, "duplicate entry in {}", domain.name());
                }
            }
        }
    }

    #[test]
    fn test_name_of_bounds() {
        assert_eq!(BAUD.name_of(0), Some("300"));
        assert_eq!(BAUD.name_of(8), Some("460800"));
        assert_eq!(BAUD.name_of(9), None);
        assert_eq!(BAUD.name_of(u32::MAX), None);
    }

    #[test]
    fn test_parse_prefix_and_sentinel() {
        assert_eq!(BAUD.parse("9600extra"), Baud::B9600.index());
        assert_eq!(BAUD.parse(""), BAUD.size());
        assert_eq!(BAUD.parse("1200"), BAUD.size());
        assert_eq!(FLOW.parse("xon/xoff"), FlowControl::XonXoff.index());
        // Byte-literal, no case folding
        assert_eq!(PARITY.parse("NONE"), PARITY.size());
    }

    #[test]
    fn test_entries_in_order() {
        let entries: Vec<_> = PARITY.entries().collect();
        assert_eq!(entries, vec![(0, "none"), (1, "odd"), (2, "even")]);
    }

    #[test]
    fn test_enum_discriminants_match_tables() {
        for baud in Baud::ALL {
            assert_eq!(BAUD.name_of(baud.index()), Some(baud.as_str()));
        }
        assert_eq!(Baud::MAX, 9);
        assert_eq!(Parity::Even.index(), 2);
        assert_eq!(FlowControl::XonXoff.as_str(), "xon/xoff");
    }

    #[test]
    fn test_defaults_are_9600_8n1() {
        assert_eq!(Baud::default(), Baud::B9600);
        assert_eq!(DataBits::default(), DataBits::Eight);
        assert_eq!(Parity::default(), Parity::None);
        assert_eq!(StopBits::default(), StopBits::One);
        assert_eq!(FlowControl::default(), FlowControl::Off);
        assert_eq!(Dtr::default(), Dtr::Off);
        assert_eq!(Rts::default(), Rts::Off);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("115200".parse::<Baud>(), Ok(Baud::B115200));
        assert_eq!("hardware".parse::<FlowControl>(), Ok(FlowControl::Hardware));
        assert_eq!(
            "mark".parse::<Parity>(),
            Err(Error::UnrecognizedValue {
                domain: "parity",
                input: "mark".to_string(),
            })
        );
    }

    #[test]
    fn test_try_from_index() {
        assert_eq!(StopBits::try_from(1), Ok(StopBits::Two));
        assert_eq!(
            StopBits::try_from(2),
            Err(Error::IndexOutOfRange {
                domain: "stop bits",
                index: 2,
            })
        );
    }

    #[test]
    fn test_baud_rate_lookup() {
        assert_eq!(Baud::B460800.rate(), 460800);
        assert_eq!(Baud::from_rate(57600), Some(Baud::B57600));
        assert_eq!(Baud::from_rate(1200), None);
    }

    #[test]
    fn test_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&FlowControl::XonXoff).unwrap();
        assert_eq!(json, "\"xon/xoff\"");
        let parsed: DataBits = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(parsed, DataBits::Seven);
        assert!(serde_json::from_str::<Dtr>("\"maybe\"").is_err());
    }

    #[test]
    fn test_line_state_from_bool() {
        assert_eq!(Dtr::from(true), Dtr::On);
        assert!(Rts::from(true).is_on());
        assert!(!Rts::Off.is_on());
    }
}
