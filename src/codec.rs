// src/codec.rs
//
// Raw-index string codec for the line parameter domains.
//
// Backends store parameters as plain indices and frequently fill them from
// user text, so both directions are exposed on bare `u32`s:
//   - `<param>_str(index)` returns the canonical string, `None` when out of range
//   - `parse_<param>(text)` returns the first index whose string prefixes
//     `text`, or the domain size (`<Type>::MAX`) when nothing matches
//
// Neither direction fails. Callers check for `None` / the sentinel themselves.

use crate::params::{Domain, BAUD, DATA, DTR, FLOW, PARITY, RTS, STOP};
use crate::tlog_trace;

fn lookup(domain: &Domain, index: u32) -> Option<&'static str> {
    tlog_trace!("[rs232] {} index={}", domain.name(), index);
    domain.name_of(index)
}

fn scan(domain: &Domain, text: &str) -> u32 {
    tlog_trace!("[rs232] {} text={:?}", domain.name(), text);
    domain.parse(text)
}

// ============================================================================
// Baud
// ============================================================================

pub fn baud_str(baud: u32) -> Option<&'static str> {
    lookup(&BAUD, baud)
}

pub fn parse_baud(text: &str) -> u32 {
    scan(&BAUD, text)
}

// ============================================================================
// Data Bits
// ============================================================================

pub fn data_str(data: u32) -> Option<&'static str> {
    lookup(&DATA, data)
}

pub fn parse_data(text: &str) -> u32 {
    scan(&DATA, text)
}

// ============================================================================
// Parity
// ============================================================================

pub fn parity_str(parity: u32) -> Option<&'static str> {
    lookup(&PARITY, parity)
}

pub fn parse_parity(text: &str) -> u32 {
    scan(&PARITY, text)
}

// ============================================================================
// Stop Bits
// ============================================================================

pub fn stop_str(stop: u32) -> Option<&'static str> {
    lookup(&STOP, stop)
}

pub fn parse_stop(text: &str) -> u32 {
    scan(&STOP, text)
}

// ============================================================================
// Flow Control
// ============================================================================

pub fn flow_str(flow: u32) -> Option<&'static str> {
    lookup(&FLOW, flow)
}

pub fn parse_flow(text: &str) -> u32 {
    scan(&FLOW, text)
}

// ============================================================================
// DTR / RTS
// ============================================================================

pub fn dtr_str(dtr: u32) -> Option<&'static str> {
    lookup(&DTR, dtr)
}

pub fn parse_dtr(text: &str) -> u32 {
    scan(&DTR, text)
}

pub fn rts_str(rts: u32) -> Option<&'static str> {
    lookup(&RTS, rts)
}

pub fn parse_rts(text: &str) -> u32 {
    scan(&RTS, text)
}

// ============================================================================
// Tests
// ============================================================================
