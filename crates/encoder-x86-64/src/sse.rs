// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! Scalar double-precision SSE encoders: MOVSD, ADDSD, SUBSD, MULSD,
//! DIVSD, SQRTSD, MAXSD, MINSD, CMPSD, COMISD, CVTSI2SD, CVTSD2SI.
//!
//! Every one of these (bar COMISD) shares the same prefix shape: mandatory
//! `0xF2`, an optional REX, the `0x0F` escape, and a single opcode byte.
//! [`sse_prefix`] builds that shape once; the named wrappers below only
//! supply the opcode and the operand-dependent REX bits.

use crate::operand::{indirect_operand, make_modrm, make_rex};
use crate::registers::{GPReg, IndirectGPReg, Mode, SDCmp, XmmReg};
use crate::Code;

const OP_MOV: u8 = 0x10;
const OP_CVTSI2SD: u8 = 0x2A;
const OP_CVTSD2SI: u8 = 0x2D;
const OP_SQRT: u8 = 0x51;
const OP_ADD: u8 = 0x58;
const OP_MUL: u8 = 0x59;
const OP_SUB: u8 = 0x5C;
const OP_MIN: u8 = 0x5D;
const OP_DIV: u8 = 0x5E;
const OP_MAX: u8 = 0x5F;
const OP_CMP: u8 = 0xC2;

/// `0xF2 [REX] 0x0F opcode`. REX is emitted whenever `force_w` is set (the
/// integer-conversion forms always want REX.W, even between two low
/// registers) or either operand needs REX.R/REX.B to select.
fn sse_prefix(code: &mut Code, opcode: u8, force_w: bool, dest_hi: bool, src_hi: bool) -> usize {
    code.push(0xF2);
    let mut n = 1;
    if force_w || dest_hi || src_hi {
        code.push(make_rex(force_w, dest_hi, false, src_hi));
        n += 1;
    }
    code.push(0x0F);
    code.push(opcode);
    n + 2
}

fn sd_reg_reg(code: &mut Code, opcode: u8, force_w: bool, dest: XmmReg, src: XmmReg) -> usize {
    let n = sse_prefix(code, opcode, force_w, dest.is_extended(), src.is_extended());
    code.push(make_modrm(Mode::Dir, dest.encoding(), src.low_bits()));
    n + 1
}

fn sd_reg_indirect(code: &mut Code, opcode: u8, force_w: bool, dest: XmmReg, src: IndirectGPReg) -> usize {
    let n = sse_prefix(code, opcode, force_w, dest.is_extended(), src.is_extended());
    n + indirect_operand(code, dest.encoding(), src)
}

macro_rules! sd_pair {
    ($reg_reg:ident, $reg_indirect:ident, $opcode:expr) => {
        pub fn $reg_reg(code: &mut Code, dest: XmmReg, src: XmmReg) -> usize {
            sd_reg_reg(code, $opcode, false, dest, src)
        }

        pub fn $reg_indirect(code: &mut Code, dest: XmmReg, src: IndirectGPReg) -> usize {
            sd_reg_indirect(code, $opcode, false, dest, src)
        }
    };
}

sd_pair!(movsd_reg_reg, movsd_reg_indirect, OP_MOV);
sd_pair!(addsd_reg_reg, addsd_reg_indirect, OP_ADD);
sd_pair!(subsd_reg_reg, subsd_reg_indirect, OP_SUB);
sd_pair!(mulsd_reg_reg, mulsd_reg_indirect, OP_MUL);
sd_pair!(divsd_reg_reg, divsd_reg_indirect, OP_DIV);
sd_pair!(sqrtsd_reg_reg, sqrtsd_reg_indirect, OP_SQRT);
sd_pair!(maxsd_reg_reg, maxsd_reg_indirect, OP_MAX);
sd_pair!(minsd_reg_reg, minsd_reg_indirect, OP_MIN);

/// `CMPSD dest, src, predicate`: like the other scalar-double forms, plus
/// a trailing imm8 naming which of the eight predicates to apply.
pub fn cmpsd_reg_reg(code: &mut Code, dest: XmmReg, src: XmmReg, predicate: SDCmp) -> usize {
    let n = sd_reg_reg(code, OP_CMP, false, dest, src);
    code.push(predicate as u8);
    n + 1
}

pub fn cmpsd_reg_indirect(code: &mut Code, dest: XmmReg, src: IndirectGPReg, predicate: SDCmp) -> usize {
    let n = sd_reg_indirect(code, OP_CMP, false, dest, src);
    code.push(predicate as u8);
    n + 1
}

/// `COMISD`: sets EFLAGS rather than producing a result register. Unlike
/// every other instruction in this module it has no `0xF2` mandatory
/// prefix and uses `0x66` instead, and REX is only emitted when one of the
/// operands actually needs it (there is no integer side to force REX.W).
/// The legacy `0x66` prefix must come before REX, not after it — REX has
/// to immediately precede the `0F` escape or the processor ignores it.
fn comisd_prefix(code: &mut Code, dest_hi: bool, src_hi: bool) -> usize {
    code.push(0x66);
    let mut n = 1;
    if dest_hi || src_hi {
        code.push(make_rex(false, dest_hi, false, src_hi));
        n += 1;
    }
    code.push(0x0F);
    code.push(0x2F);
    n + 2
}

pub fn comisd_reg_reg(code: &mut Code, dest: XmmReg, src: XmmReg) -> usize {
    let n = comisd_prefix(code, dest.is_extended(), src.is_extended());
    code.push(make_modrm(Mode::Dir, dest.encoding(), src.low_bits()));
    n + 1
}

pub fn comisd_reg_indirect(code: &mut Code, dest: XmmReg, src: IndirectGPReg) -> usize {
    let n = comisd_prefix(code, dest.is_extended(), src.is_extended());
    n + indirect_operand(code, dest.encoding(), src)
}

/// `CVTSI2SD dest, src`: converts a 64-bit integer to a scalar double.
/// REX.W is forced in both operand shapes — the source's register/memory
/// shape omits it, which this encoder treats as a defect rather than a
/// semantic to preserve (see DESIGN.md).
pub fn cvtsi2sd_reg_reg(code: &mut Code, dest: XmmReg, src: GPReg) -> usize {
    let n = sse_prefix(code, OP_CVTSI2SD, true, dest.is_extended(), src.is_extended());
    code.push(make_modrm(Mode::Dir, dest.encoding(), src.low_bits()));
    n + 1
}

pub fn cvtsi2sd_reg_indirect(code: &mut Code, dest: XmmReg, src: IndirectGPReg) -> usize {
    let n = sse_prefix(code, OP_CVTSI2SD, true, dest.is_extended(), src.is_extended());
    n + indirect_operand(code, dest.encoding(), src)
}

/// `CVTSD2SI dest, src`: converts a scalar double to a 64-bit integer,
/// truncating toward zero. REX.W is always forced here too.
pub fn cvtsd2si_reg_reg(code: &mut Code, dest: GPReg, src: XmmReg) -> usize {
    let n = sse_prefix(code, OP_CVTSD2SI, true, dest.is_extended(), src.is_extended());
    code.push(make_modrm(Mode::Dir, dest.encoding(), src.low_bits()));
    n + 1
}

pub fn cvtsd2si_reg_indirect(code: &mut Code, dest: GPReg, src: IndirectGPReg) -> usize {
    let n = sse_prefix(code, OP_CVTSD2SI, true, dest.is_extended(), src.is_extended());
    n + indirect_operand(code, dest.encoding(), src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn addsd_xmm9_xmm9() {
        let mut code = Code::new();
        let n = addsd_reg_reg(&mut code, XmmReg::XMM9, XmmReg::XMM9);
        assert_eq!(n, 5);
        assert_eq!(code, vec![0xF2, 0x45, 0x0F, 0x58, 0xC9]);
    }

    #[test]
    fn movsd_xmm0_xmm1_no_rex() {
        let mut code = Code::new();
        let n = movsd_reg_reg(&mut code, XmmReg::XMM0, XmmReg::XMM1);
        assert_eq!(n, 4);
        assert_eq!(code, vec![0xF2, 0x0F, 0x10, 0xC1]);
    }

    #[test]
    fn cmpsd_eq() {
        let mut code = Code::new();
        let n = cmpsd_reg_reg(&mut code, XmmReg::XMM0, XmmReg::XMM2, SDCmp::Eq);
        assert_eq!(n, 5);
        assert_eq!(code, vec![0xF2, 0x0F, 0xC2, 0xC2, 0x00]);
    }

    #[test]
    fn comisd_no_rex_for_low_registers() {
        let mut code = Code::new();
        let n = comisd_reg_reg(&mut code, XmmReg::XMM0, XmmReg::XMM1);
        assert_eq!(n, 4);
        assert_eq!(code, vec![0x66, 0x0F, 0x2F, 0xC1]);
    }

    /// REX must sit between `0x66` and `0x0F`, not before `0x66` — otherwise
    /// the processor ignores it and REX.R silently drops XMM8's high bit.
    #[test]
    fn comisd_dest_xmm8_puts_rex_after_0x66() {
        let mut code = Code::new();
        let n = comisd_reg_reg(&mut code, XmmReg::XMM8, XmmReg::XMM0);
        assert_eq!(n, 5);
        assert_eq!(code, vec![0x66, 0x44, 0x0F, 0x2F, 0xC0]);
    }

    #[test]
    fn cvtsi2sd_forces_rex_w_even_for_low_registers() {
        let mut code = Code::new();
        let n = cvtsi2sd_reg_reg(&mut code, XmmReg::XMM0, GPReg::RAX);
        assert_eq!(n, 5);
        assert_eq!(code, vec![0xF2, 0x48, 0x0F, 0x2A, 0xC0]);
    }

    #[test]
    fn cvtsi2sd_indirect_also_forces_rex_w() {
        let mut code = Code::new();
        let n = cvtsi2sd_reg_indirect(&mut code, XmmReg::XMM0, IndirectGPReg::RBX);
        assert_eq!(n, 5);
        assert_eq!(code, vec![0xF2, 0x48, 0x0F, 0x2A, 0x03]);
    }

    #[test]
    fn cvtsd2si_forces_rex_w() {
        let mut code = Code::new();
        let n = cvtsd2si_reg_reg(&mut code, GPReg::RAX, XmmReg::XMM1);
        assert_eq!(n, 5);
        assert_eq!(code, vec![0xF2, 0x48, 0x0F, 0x2D, 0xC1]);
    }
}
