//! # Opcode Descriptor Table
//!
//! The single source of truth for the instruction set: an ordered array of
//! 108 descriptors matched by code/mask against the fetched 12-bit word.
//!
//! Table order is significant. Fully-fixed 12-bit patterns must precede
//! families that share the same top bits with a variable low field, or they
//! would be shadowed (e.g. `INC X` at 0xEE0 with a 12-bit mask sits before
//! `LDPX r,q` at 0xEE0 with an 8-bit mask). A few entries are left shadowed
//! on purpose because the covering family computes the same result: the
//! single-flag ops resolve to SET/RST with a fixed immediate, and NOT
//! resolves to `XOR r,0xF`. The table is constructed once at compile time
//! and shared read-only by every decode.
//!
//! Mnemonics are cosmetic: they feed instruction-trace logging only and are
//! not part of the emulation contract.

/// Instruction tag, one variant per opcode table entry.
///
/// The set is closed and exhaustive; execution dispatches over this tag with
/// a single `match` rather than any open registration mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Pset,
    Jp,
    JpC,
    JpNc,
    JpZ,
    JpNz,
    Jpba,
    Call,
    Calz,
    Ret,
    Rets,
    Retd,
    Nop5,
    Nop7,
    Halt,
    IncX,
    IncY,
    LdX,
    LdY,
    LdXpR,
    LdXhR,
    LdXlR,
    LdYpR,
    LdYhR,
    LdYlR,
    LdRXp,
    LdRXh,
    LdRXl,
    LdRYp,
    LdRYh,
    LdRYl,
    AdcXh,
    AdcXl,
    AdcYh,
    AdcYl,
    CpXh,
    CpXl,
    CpYh,
    CpYl,
    LdRI,
    LdRQ,
    LdAMn,
    LdBMn,
    LdMnA,
    LdMnB,
    LdpxMx,
    LdpxR,
    LdpyMy,
    LdpyR,
    Lbpx,
    Set,
    Rst,
    Scf,
    Rcf,
    Szf,
    Rzf,
    Sdf,
    Rdf,
    Ei,
    Di,
    IncSp,
    DecSp,
    PushR,
    PushXp,
    PushXh,
    PushXl,
    PushYp,
    PushYh,
    PushYl,
    PushF,
    PopR,
    PopXp,
    PopXh,
    PopXl,
    PopYp,
    PopYh,
    PopYl,
    PopF,
    LdSphR,
    LdSplR,
    LdRSph,
    LdRSpl,
    AddRI,
    AddRQ,
    AdcRI,
    AdcRQ,
    SubRQ,
    SbcRI,
    SbcRQ,
    AndRI,
    AndRQ,
    OrRI,
    OrRQ,
    XorRI,
    XorRQ,
    CpRI,
    CpRQ,
    FanRI,
    FanRQ,
    Rlc,
    Rrc,
    IncMn,
    DecMn,
    Acpx,
    Acpy,
    Scpx,
    Scpy,
    Not,
}

// Fixed-bit masks by width of the fixed part.
const MASK_4B: u16 = 0xF00;
const MASK_6B: u16 = 0xFC0;
const MASK_7B: u16 = 0xFE0;
const MASK_8B: u16 = 0xFF0;
const MASK_10B: u16 = 0xFFC;
const MASK_12B: u16 = 0xFFF;

/// Static description of one instruction pattern.
///
/// `code`/`mask` select the entry; `mask_arg0`/`shift_arg0` optionally carve
/// a secondary field (register selector or immediate) out of the remaining
/// bits; `cycles` is the declared cycle cost charged to the pacing clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeDescriptor {
    /// Instruction mnemonic, for trace logging only.
    pub mnemonic: &'static str,
    /// Fixed bit pattern after masking.
    pub code: u16,
    /// Which bits of the word are fixed.
    pub mask: u16,
    /// Right-shift applied when extracting `arg0`.
    pub shift_arg0: u16,
    /// Bits of the word forming `arg0`; 0 means "no secondary field"
    /// (then `arg0` is simply the non-fixed bits shifted down).
    pub mask_arg0: u16,
    /// Cycle cost of the instruction.
    pub cycles: u8,
    /// Dispatch tag.
    pub op: Opcode,
}

const fn entry(
    mnemonic: &'static str,
    code: u16,
    mask: u16,
    shift_arg0: u16,
    mask_arg0: u16,
    cycles: u8,
    op: Opcode,
) -> OpcodeDescriptor {
    OpcodeDescriptor {
        mnemonic,
        code,
        mask,
        shift_arg0,
        mask_arg0,
        cycles,
        op,
    }
}

/// The complete instruction set, in match-priority order.
pub static OPCODE_TABLE: [OpcodeDescriptor; 108] = [
    entry("PSET", 0xE40, MASK_7B, 0, 0, 5, Opcode::Pset),
    entry("JP", 0x000, MASK_4B, 0, 0, 5, Opcode::Jp),
    entry("JP C", 0x200, MASK_4B, 0, 0, 5, Opcode::JpC),
    entry("JP NC", 0x300, MASK_4B, 0, 0, 5, Opcode::JpNc),
    entry("JP Z", 0x600, MASK_4B, 0, 0, 5, Opcode::JpZ),
    entry("JP NZ", 0x700, MASK_4B, 0, 0, 5, Opcode::JpNz),
    entry("JPBA", 0xFE8, MASK_12B, 0, 0, 5, Opcode::Jpba),
    entry("CALL", 0x400, MASK_4B, 0, 0, 7, Opcode::Call),
    entry("CALZ", 0x500, MASK_4B, 0, 0, 7, Opcode::Calz),
    entry("RET", 0xFDF, MASK_12B, 0, 0, 7, Opcode::Ret),
    entry("RETS", 0xFDE, MASK_12B, 0, 0, 12, Opcode::Rets),
    entry("RETD", 0x100, MASK_4B, 0, 0, 12, Opcode::Retd),
    entry("NOP5", 0xFFB, MASK_12B, 0, 0, 5, Opcode::Nop5),
    entry("NOP7", 0xFFF, MASK_12B, 0, 0, 7, Opcode::Nop7),
    entry("HALT", 0xFF8, MASK_12B, 0, 0, 5, Opcode::Halt),
    entry("INC X", 0xEE0, MASK_12B, 0, 0, 5, Opcode::IncX),
    entry("INC Y", 0xEF0, MASK_12B, 0, 0, 5, Opcode::IncY),
    entry("LD X", 0xB00, MASK_4B, 0, 0, 5, Opcode::LdX),
    entry("LD Y", 0x800, MASK_4B, 0, 0, 5, Opcode::LdY),
    entry("LD XP r", 0xE80, MASK_10B, 0, 0, 5, Opcode::LdXpR),
    entry("LD XH r", 0xE84, MASK_10B, 0, 0, 5, Opcode::LdXhR),
    entry("LD XL r", 0xE88, MASK_10B, 0, 0, 5, Opcode::LdXlR),
    entry("LD YP r", 0xE90, MASK_10B, 0, 0, 5, Opcode::LdYpR),
    entry("LD YH r", 0xE94, MASK_10B, 0, 0, 5, Opcode::LdYhR),
    entry("LD YL r", 0xE98, MASK_10B, 0, 0, 5, Opcode::LdYlR),
    entry("LD r XP", 0xEA0, MASK_10B, 0, 0, 5, Opcode::LdRXp),
    entry("LD r XH", 0xEA4, MASK_10B, 0, 0, 5, Opcode::LdRXh),
    entry("LD r XL", 0xEA8, MASK_10B, 0, 0, 5, Opcode::LdRXl),
    entry("LD r YP", 0xEB0, MASK_10B, 0, 0, 5, Opcode::LdRYp),
    entry("LD r YH", 0xEB4, MASK_10B, 0, 0, 5, Opcode::LdRYh),
    entry("LD r YL", 0xEB8, MASK_10B, 0, 0, 5, Opcode::LdRYl),
    entry("ADC XH", 0xA00, MASK_8B, 0, 0, 7, Opcode::AdcXh),
    entry("ADC XL", 0xA10, MASK_8B, 0, 0, 7, Opcode::AdcXl),
    entry("ADC YH", 0xA20, MASK_8B, 0, 0, 7, Opcode::AdcYh),
    entry("ADC YL", 0xA30, MASK_8B, 0, 0, 7, Opcode::AdcYl),
    entry("CP XH", 0xA40, MASK_8B, 0, 0, 7, Opcode::CpXh),
    entry("CP XL", 0xA50, MASK_8B, 0, 0, 7, Opcode::CpXl),
    entry("CP YH", 0xA60, MASK_8B, 0, 0, 7, Opcode::CpYh),
    entry("CP YL", 0xA70, MASK_8B, 0, 0, 7, Opcode::CpYl),
    entry("LD r i", 0xE00, MASK_6B, 4, 0x030, 5, Opcode::LdRI),
    entry("LD r q", 0xEC0, MASK_8B, 2, 0x00C, 5, Opcode::LdRQ),
    entry("LD A Mn", 0xFA0, MASK_8B, 0, 0, 5, Opcode::LdAMn),
    entry("LD B Mn", 0xFB0, MASK_8B, 0, 0, 5, Opcode::LdBMn),
    entry("LD Mn A", 0xF80, MASK_8B, 0, 0, 5, Opcode::LdMnA),
    entry("LD Mn B", 0xF90, MASK_8B, 0, 0, 5, Opcode::LdMnB),
    entry("LDPX MX", 0xE60, MASK_8B, 0, 0, 5, Opcode::LdpxMx),
    entry("LDPX r q", 0xEE0, MASK_8B, 2, 0x00C, 5, Opcode::LdpxR),
    entry("LDPY MY", 0xE70, MASK_8B, 0, 0, 5, Opcode::LdpyMy),
    entry("LDPY r q", 0xEF0, MASK_8B, 2, 0x00C, 5, Opcode::LdpyR),
    entry("LBPX", 0x900, MASK_4B, 0, 0, 5, Opcode::Lbpx),
    entry("SET", 0xF40, MASK_8B, 0, 0, 7, Opcode::Set),
    entry("RST", 0xF50, MASK_8B, 0, 0, 7, Opcode::Rst),
    entry("SCF", 0xF41, MASK_12B, 0, 0, 7, Opcode::Scf),
    entry("RCF", 0xF5E, MASK_12B, 0, 0, 7, Opcode::Rcf),
    entry("SZF", 0xF42, MASK_12B, 0, 0, 7, Opcode::Szf),
    entry("RZF", 0xF5D, MASK_12B, 0, 0, 7, Opcode::Rzf),
    entry("SDF", 0xF44, MASK_12B, 0, 0, 7, Opcode::Sdf),
    entry("RDF", 0xF5B, MASK_12B, 0, 0, 7, Opcode::Rdf),
    entry("EI", 0xF48, MASK_12B, 0, 0, 7, Opcode::Ei),
    entry("DI", 0xF57, MASK_12B, 0, 0, 7, Opcode::Di),
    entry("INC SP", 0xFDB, MASK_12B, 0, 0, 5, Opcode::IncSp),
    entry("DEC SP", 0xFCB, MASK_12B, 0, 0, 5, Opcode::DecSp),
    entry("PUSH r", 0xFC0, MASK_10B, 0, 0, 5, Opcode::PushR),
    entry("PUSH XP", 0xFC4, MASK_12B, 0, 0, 5, Opcode::PushXp),
    entry("PUSH XH", 0xFC5, MASK_12B, 0, 0, 5, Opcode::PushXh),
    entry("PUSH XL", 0xFC6, MASK_12B, 0, 0, 5, Opcode::PushXl),
    entry("PUSH YP", 0xFC7, MASK_12B, 0, 0, 5, Opcode::PushYp),
    entry("PUSH YH", 0xFC8, MASK_12B, 0, 0, 5, Opcode::PushYh),
    entry("PUSH YL", 0xFC9, MASK_12B, 0, 0, 5, Opcode::PushYl),
    entry("PUSH F", 0xFCA, MASK_12B, 0, 0, 5, Opcode::PushF),
    entry("POP r", 0xFD0, MASK_10B, 0, 0, 5, Opcode::PopR),
    entry("POP XP", 0xFD4, MASK_12B, 0, 0, 5, Opcode::PopXp),
    entry("POP XH", 0xFD5, MASK_12B, 0, 0, 5, Opcode::PopXh),
    entry("POP XL", 0xFD6, MASK_12B, 0, 0, 5, Opcode::PopXl),
    entry("POP YP", 0xFD7, MASK_12B, 0, 0, 5, Opcode::PopYp),
    entry("POP YH", 0xFD8, MASK_12B, 0, 0, 5, Opcode::PopYh),
    entry("POP YL", 0xFD9, MASK_12B, 0, 0, 5, Opcode::PopYl),
    entry("POP F", 0xFDA, MASK_12B, 0, 0, 5, Opcode::PopF),
    entry("LD SPH r", 0xFE0, MASK_10B, 0, 0, 5, Opcode::LdSphR),
    entry("LD SPL r", 0xFF0, MASK_10B, 0, 0, 5, Opcode::LdSplR),
    entry("LD r SPH", 0xFE4, MASK_10B, 0, 0, 5, Opcode::LdRSph),
    entry("LD r SPL", 0xFF4, MASK_10B, 0, 0, 5, Opcode::LdRSpl),
    entry("ADD r i", 0xC00, MASK_6B, 4, 0x030, 7, Opcode::AddRI),
    entry("ADD r q", 0xA80, MASK_8B, 2, 0x00C, 7, Opcode::AddRQ),
    entry("ADC r i", 0xC40, MASK_6B, 4, 0x030, 7, Opcode::AdcRI),
    entry("ADC r q", 0xA90, MASK_8B, 2, 0x00C, 7, Opcode::AdcRQ),
    entry("SUB r q", 0xAA0, MASK_8B, 2, 0x00C, 7, Opcode::SubRQ),
    entry("SBC r i", 0xB40, MASK_6B, 4, 0x030, 7, Opcode::SbcRI),
    entry("SBC r q", 0xAB0, MASK_8B, 2, 0x00C, 7, Opcode::SbcRQ),
    entry("AND r i", 0xC80, MASK_6B, 4, 0x030, 7, Opcode::AndRI),
    entry("AND r q", 0xAC0, MASK_8B, 2, 0x00C, 7, Opcode::AndRQ),
    entry("OR r i", 0xCC0, MASK_6B, 4, 0x030, 7, Opcode::OrRI),
    entry("OR r q", 0xAD0, MASK_8B, 2, 0x00C, 7, Opcode::OrRQ),
    entry("XOR r i", 0xD00, MASK_6B, 4, 0x030, 7, Opcode::XorRI),
    entry("XOR r q", 0xAE0, MASK_8B, 2, 0x00C, 7, Opcode::XorRQ),
    entry("CP r i", 0xDC0, MASK_6B, 4, 0x030, 7, Opcode::CpRI),
    entry("CP r q", 0xF00, MASK_8B, 2, 0x00C, 7, Opcode::CpRQ),
    entry("FAN r i", 0xD80, MASK_6B, 4, 0x030, 7, Opcode::FanRI),
    entry("FAN r q", 0xF10, MASK_8B, 2, 0x00C, 7, Opcode::FanRQ),
    entry("RLC r", 0xAF0, MASK_8B, 0, 0, 7, Opcode::Rlc),
    entry("RRC r", 0xE8C, MASK_10B, 0, 0, 5, Opcode::Rrc),
    entry("INC Mn", 0xF60, MASK_8B, 0, 0, 7, Opcode::IncMn),
    entry("DEC Mn", 0xF70, MASK_8B, 0, 0, 7, Opcode::DecMn),
    entry("ACPX r", 0xF28, MASK_10B, 0, 0, 7, Opcode::Acpx),
    entry("ACPY r", 0xF2C, MASK_10B, 0, 0, 7, Opcode::Acpy),
    entry("SCPX r", 0xF38, MASK_10B, 0, 0, 7, Opcode::Scpx),
    entry("SCPY r", 0xF3C, MASK_10B, 0, 0, 7, Opcode::Scpy),
    entry("NOT r", 0xD0F, 0xFCF, 4, 0, 7, Opcode::Not),
];

/// Decodes a fetched 12-bit word into its descriptor: the first table entry
/// whose fixed bits match. `None` is a decode failure, surfaced by the step
/// engine as [`StopReason::IllegalOpcode`](crate::StopReason::IllegalOpcode).
pub fn decode(word: u16) -> Option<&'static OpcodeDescriptor> {
    OPCODE_TABLE.iter().find(|d| word & d.mask == d.code)
}

/// Extracts the handler arguments from a decoded word.
///
/// With a secondary field declared, `arg0` is that field and `arg1` the
/// remaining variable bits; without one, `arg0` is all the variable bits
/// (shifted) and `arg1` is 0.
pub fn extract_args(word: u16, d: &OpcodeDescriptor) -> (u8, u8) {
    if d.mask_arg0 != 0 {
        (
            ((word & d.mask_arg0) >> d.shift_arg0) as u8,
            (word & !(d.mask | d.mask_arg0)) as u8,
        )
    } else {
        (((word & !d.mask) >> d.shift_arg0) as u8, 0)
    }
}
