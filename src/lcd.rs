//! # LCD Segment Projection
//!
//! Translates a display-memory write into up to four physical pin states.
//! Display cells pack four common-line bits per nibble; the segment index
//! comes from the low 7 address bits and the common-line base from address
//! bit 7 (bank half) and bit 0 (nibble half).
//!
//! This is a stateless fan-out: one `(seg, com, bit)` triple per bit of the
//! written nibble, delivered through [`Hal::set_lcd_pin`](crate::Hal).
//! Two out-of-matrix combinations (segment 8 with common < 4, and segment
//! 28 with common >= 12) carry the status icons rather than matrix pixels;
//! interpreting them is the rendering host's business.

/// Segment index of a display-memory address.
pub fn segment(addr: u16) -> u8 {
    ((addr & 0x7F) >> 1) as u8
}

/// First common line driven by a display-memory address; the written
/// nibble's bits 0..4 land on `com0(addr) + 0..4`.
pub fn com0(addr: u16) -> u8 {
    (((addr & 0x80) >> 7) * 8 + (addr & 0x1) * 4) as u8
}
