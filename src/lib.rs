//! Test-only library interface for rich-keypad.
//!
//! This module exposes the pure logic modules that can be tested on the
//! host (no embedded hardware required): the shared report state and the
//! per-button key mapper.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

pub mod mapper;
pub mod report;
pub mod suspend;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
