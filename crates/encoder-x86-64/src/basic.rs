// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! The eight basic arithmetic/logical operations (ADD, OR, ADC, SBB, AND,
//! SUB, XOR, CMP) across their six operand shapes, plus MUL/IMUL and DIV.

use crate::operand::{indirect_operand, make_modrm, make_rex, push_imm32};
use crate::registers::{BasicOpClass, GPReg, IndirectGPReg, Mode};
use crate::Code;

/// `RAX op= imm32`, the accumulator short form.
pub fn basic_rax_imm32(code: &mut Code, op: BasicOpClass, imm: i32) -> usize {
    code.push(make_rex(true, false, false, false));
    code.push(op.ax_imm_opcode());
    1 + 1 + push_imm32(code, imm)
}

/// `reg op= imm32`. Dispatches to [`basic_rax_imm32`] when `reg` is RAX, the
/// way the accumulator form is shorter for that one register.
pub fn basic_reg_imm32(code: &mut Code, op: BasicOpClass, reg: GPReg, imm: i32) -> usize {
    if matches!(reg, GPReg::RAX) {
        return basic_rax_imm32(code, op, imm);
    }
    code.push(make_rex(true, false, false, reg.is_extended()));
    code.push(0x81);
    code.push(make_modrm(Mode::Dir, op.as_ext(), reg.low_bits()));
    2 + push_imm32(code, imm)
}

/// `[reg] op= imm32`.
pub fn basic_indirect_imm32(code: &mut Code, op: BasicOpClass, base: IndirectGPReg, imm: i32) -> usize {
    code.push(make_rex(true, false, false, base.is_extended()));
    code.push(0x81);
    let i = indirect_operand(code, op.as_ext(), base);
    i + 2 + push_imm32(code, imm)
}

/// `regD op= regS`, the register/register form.
pub fn basic_reg_reg(code: &mut Code, op: BasicOpClass, dest: GPReg, src: GPReg) -> usize {
    code.push(make_rex(true, dest.is_extended(), false, src.is_extended()));
    code.push((op.as_ext() << 3) | 0b011);
    code.push(make_modrm(Mode::Dir, dest.encoding(), src.low_bits()));
    3
}

/// `[regD] op= regS`: the memory operand is the destination.
pub fn basic_indirect_reg(code: &mut Code, op: BasicOpClass, dest: IndirectGPReg, src: GPReg) -> usize {
    code.push(make_rex(true, src.is_extended(), false, dest.is_extended()));
    code.push(op.mr_opcode());
    let i = indirect_operand(code, src.encoding(), dest);
    i + 2
}

/// `regD op= [regS]`: the memory operand is the source.
pub fn basic_reg_indirect(code: &mut Code, op: BasicOpClass, dest: GPReg, src: IndirectGPReg) -> usize {
    code.push(make_rex(true, dest.is_extended(), false, src.is_extended()));
    code.push(op.rm_opcode());
    let i = indirect_operand(code, dest.encoding(), src);
    i + 2
}

/// `MUL reg`: RDX:RAX <- RAX * reg.
pub fn mul_reg(code: &mut Code, src: GPReg) -> usize {
    code.push(make_rex(true, false, false, src.is_extended()));
    code.push(0xF7);
    code.push(make_modrm(Mode::Dir, 5, src.low_bits()));
    3
}

/// `MUL [reg]`.
pub fn mul_indirect(code: &mut Code, src: IndirectGPReg) -> usize {
    code.push(make_rex(true, false, false, src.is_extended()));
    code.push(0xF7);
    let i = indirect_operand(code, 5, src);
    i + 2
}

/// `IMUL regD, regS` (truncated two-operand form). Dispatches to
/// [`mul_reg`] when `dest` is RAX, matching the one-operand MUL encoding.
pub fn imul_reg_reg(code: &mut Code, dest: GPReg, src: GPReg) -> usize {
    if matches!(dest, GPReg::RAX) {
        return mul_reg(code, src);
    }
    code.push(make_rex(true, dest.is_extended(), false, src.is_extended()));
    code.push(0x0F);
    code.push(0xAF);
    code.push(make_modrm(Mode::Dir, dest.encoding(), src.low_bits()));
    4
}

/// `IMUL regD, [regS]`.
pub fn imul_reg_indirect(code: &mut Code, dest: GPReg, src: IndirectGPReg) -> usize {
    code.push(make_rex(true, dest.is_extended(), false, src.is_extended()));
    code.push(0x0F);
    code.push(0xAF);
    let i = indirect_operand(code, dest.encoding(), src);
    i + 3
}

/// `IMUL regD, regS, imm32`.
pub fn imul_reg_reg_imm32(code: &mut Code, dest: GPReg, src: GPReg, imm: i32) -> usize {
    code.push(make_rex(true, dest.is_extended(), false, src.is_extended()));
    code.push(0x69);
    code.push(make_modrm(Mode::Dir, dest.encoding(), src.low_bits()));
    3 + push_imm32(code, imm)
}

/// `IMUL regD, [regS], imm32`.
pub fn imul_reg_indirect_imm32(code: &mut Code, dest: GPReg, src: IndirectGPReg, imm: i32) -> usize {
    code.push(make_rex(true, dest.is_extended(), false, src.is_extended()));
    code.push(0x69);
    let i = indirect_operand(code, dest.encoding(), src);
    i + 2 + push_imm32(code, imm)
}

/// `DIV reg` (signed IDIV form): RDX:RAX / reg -> RAX quotient, RDX remainder.
pub fn div_reg(code: &mut Code, src: GPReg) -> usize {
    code.push(make_rex(true, false, false, src.is_extended()));
    code.push(0xF7);
    code.push(make_modrm(Mode::Dir, 7, src.low_bits()));
    3
}

/// `DIV [reg]`.
pub fn div_indirect(code: &mut Code, src: IndirectGPReg) -> usize {
    code.push(make_rex(true, false, false, src.is_extended()));
    code.push(0xF7);
    let i = indirect_operand(code, 7, src);
    i + 2
}
