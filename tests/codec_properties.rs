// tests/codec_properties.rs
//
// Cross-domain properties of the string codec and the summary formatter.

use rs232_lib::codec::*;
use rs232_lib::params::{Domain, BAUD, DATA, DTR, FLOW, LINE_DOMAINS, PARITY, RTS, STOP};
use rs232_lib::{
    strerror, summary, summary_of, Baud, DataBits, ErrorCode, FlowControl, LineSettings, Parity,
    PortDescriptor, StopBits,
};

type Lookup = fn(u32) -> Option<&'static str>;
type Parse = fn(&str) -> u32;

fn codecs() -> [(&'static Domain, Lookup, Parse); 7] {
    [
        (&BAUD, baud_str, parse_baud),
        (&DATA, data_str, parse_data),
        (&PARITY, parity_str, parse_parity),
        (&STOP, stop_str, parse_stop),
        (&FLOW, flow_str, parse_flow),
        (&DTR, dtr_str, parse_dtr),
        (&RTS, rts_str, parse_rts),
    ]
}

#[test]
fn test_round_trip_every_index() {
    for (domain, lookup, parse) in codecs() {
        for i in 0..domain.size() {
            let text = lookup(i).expect("valid index has a string");
            assert_eq!(parse(text), i, "{} index {}", domain.name(), i);
        }
    }
}

#[test]
fn test_lookup_at_and_past_sentinel_is_absent() {
    for (domain, lookup, _) in codecs() {
        assert_eq!(lookup(domain.size()), None, "{}", domain.name());
        assert_eq!(lookup(domain.size() + 1), None);
        assert_eq!(lookup(u32::MAX), None);
    }
}

#[test]
fn test_unmatched_text_returns_sentinel() {
    for (domain, _, parse) in codecs() {
        for text in ["", "?", "bogus", "\u{0}", "ON", "Hardware"] {
            assert_eq!(parse(text), domain.size(), "{} {:?}", domain.name(), text);
        }
    }
}

#[test]
fn test_prefix_extension_still_matches() {
    assert_eq!(parse_baud("9600extra"), Baud::B9600.index());
    assert_eq!(parse_parity("none,"), Parity::None.index());
    assert_eq!(parse_flow("hardware flow"), FlowControl::Hardware.index());
    assert_eq!(parse_dtr("onwards"), 1);
}

#[test]
fn test_domain_tables_match_typed_enums() {
    assert_eq!(LINE_DOMAINS.len(), 7);
    assert_eq!(Baud::domain(), &BAUD);
    assert_eq!(DataBits::MAX, DATA.size());
    assert_eq!(StopBits::MAX, STOP.size());
}

#[test]
fn test_error_table() {
    assert_eq!(strerror(ErrorCode::Open.index()), Some("open error"));
    assert_eq!(strerror(ErrorCode::PortClosed.index()), Some("port closed error"));
    assert_eq!(strerror(ErrorCode::MAX), None);
}

#[test]
fn test_summary_exact_line() {
    let port = PortDescriptor::new("/dev/ttyS0", &LineSettings::default());
    assert_eq!(
        summary(&port),
        "device: /dev/ttyS0, baud: 9600, data bits: 8, parity: none, stop bits: 1, flow control: off"
    );
    assert_eq!(summary_of(None), None);
}

#[test]
fn test_concurrent_codec_calls() {
    std::thread::scope(|s| {
        for t in 0..8u32 {
            s.spawn(move || {
                for n in 0..2000u32 {
                    let i = (n + t) % Baud::MAX;
                    let text = baud_str(i).unwrap();
                    assert_eq!(parse_baud(text), i);
                    assert_eq!(parse_baud("bogus"), Baud::MAX);

                    let port = PortDescriptor::new(
                        format!("/dev/ttyS{}", t),
                        &LineSettings {
                            baud: Baud::from_index(i).unwrap(),
                            ..LineSettings::default()
                        },
                    );
                    let line = summary(&port);
                    assert!(line.starts_with(&format!("device: /dev/ttyS{}, baud: {},", t, text)));
                }
            });
        }
    });
}
