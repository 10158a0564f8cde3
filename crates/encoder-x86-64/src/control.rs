// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! Control transfer (Jcc/JMP/CALL/RET/SYSCALL/LOOP family) and the string
//! move instruction MOVS with its REP prefix.
//!
//! None of these encoders compute a displacement: callers pass the exact
//! `rel8`/`rel32` value already relative to the byte following the
//! instruction. Resolving labels to displacements is a linking concern
//! and out of scope here.

use crate::operand::{make_modrm, make_rex, push_imm32, push_rex_if_needed};
use crate::registers::{CondTest, GPReg, Mode};
use crate::Code;

/// `Jcc rel32`.
pub fn jcc(code: &mut Code, test: CondTest, disp: i32) -> usize {
    code.push(0x0F);
    code.push(0x80 | test.encoding());
    2 + push_imm32(code, disp)
}

/// `JMP rel32`.
pub fn jmp_rel32(code: &mut Code, disp: i32) -> usize {
    code.push(0xE9);
    1 + push_imm32(code, disp)
}

/// `JMP reg`: an indirect jump through a register.
pub fn jmp_reg(code: &mut Code, reg: GPReg) -> usize {
    let n = push_rex_if_needed(code, false, false, reg.is_extended());
    code.push(0xFF);
    code.push(make_modrm(Mode::Dir, 4, reg.low_bits()));
    n + 2
}

/// `CALL rel32`.
pub fn call_rel32(code: &mut Code, disp: i32) -> usize {
    code.push(0xE8);
    1 + push_imm32(code, disp)
}

/// `CALL reg`: an indirect call through a register.
pub fn call_reg(code: &mut Code, reg: GPReg) -> usize {
    let n = push_rex_if_needed(code, false, false, reg.is_extended());
    code.push(0xFF);
    code.push(make_modrm(Mode::Dir, 2, reg.low_bits()));
    n + 2
}

/// `RET`: always exactly one byte.
pub fn ret(code: &mut Code) -> usize {
    code.push(0xC3);
    1
}

/// `SYSCALL`.
pub fn syscall(code: &mut Code) -> usize {
    code.push(0x0F);
    code.push(0x05);
    2
}

/// `MOVS` (byte form): copies `[RSI]` to `[RDI]`, advancing both by one.
pub fn movs_byte(code: &mut Code) -> usize {
    code.push(0xA4);
    1
}

/// The `REP` prefix, for repeating a string instruction `RCX` times.
pub fn rep(code: &mut Code) -> usize {
    code.push(0xF3);
    1
}

/// `LOOP rel8`: decrement RCX, jump if nonzero.
pub fn loop_(code: &mut Code, disp: i8) -> usize {
    code.push(0xE2);
    code.push(disp as u8);
    2
}

/// `LOOPE rel8` (a.k.a. `LOOPZ`): decrement RCX, jump if nonzero and ZF=1.
pub fn loop_e(code: &mut Code, disp: i8) -> usize {
    code.push(0xE1);
    code.push(disp as u8);
    2
}

/// `LOOPNE rel8` (a.k.a. `LOOPNZ`): decrement RCX, jump if nonzero and ZF=0.
pub fn loop_ne(code: &mut Code, disp: i8) -> usize {
    code.push(0xE0);
    code.push(disp as u8);
    2
}
