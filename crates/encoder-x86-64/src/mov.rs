// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! MOV in its five operand shapes.

use crate::operand::{indirect_operand, make_modrm, make_rex, push_imm32, push_imm64};
use crate::registers::{GPReg, IndirectGPReg, Mode};
use crate::Code;

/// `dest <- src`.
pub fn mov_reg_reg(code: &mut Code, dest: GPReg, src: GPReg) -> usize {
    code.push(make_rex(true, dest.is_extended(), false, src.is_extended()));
    code.push(0x8B);
    code.push(make_modrm(Mode::Dir, dest.encoding(), src.low_bits()));
    3
}

/// `dest <- [src]`.
pub fn mov_reg_indirect(code: &mut Code, dest: GPReg, src: IndirectGPReg) -> usize {
    code.push(make_rex(true, dest.is_extended(), false, src.is_extended()));
    code.push(0x8B);
    let i = indirect_operand(code, dest.encoding(), src);
    i + 2
}

/// `[dest] <- src`.
pub fn mov_indirect_reg(code: &mut Code, dest: IndirectGPReg, src: GPReg) -> usize {
    code.push(make_rex(true, src.is_extended(), false, dest.is_extended()));
    code.push(0x89);
    let i = indirect_operand(code, src.encoding(), dest);
    i + 2
}

/// `dest <- imm64`: the only fixed-width form, always exactly 10 bytes.
pub fn mov_reg_imm64(code: &mut Code, dest: GPReg, imm: i64) -> usize {
    code.push(make_rex(true, false, false, dest.is_extended()));
    code.push(0xB8 | dest.low_bits());
    push_imm64(code, imm);
    10
}

/// `[dest] <- imm32`.
pub fn mov_indirect_imm32(code: &mut Code, dest: IndirectGPReg, imm: i32) -> usize {
    code.push(make_rex(true, false, false, dest.is_extended()));
    code.push(0xC7);
    let i = indirect_operand(code, 0, dest);
    i + 2 + push_imm32(code, imm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mov_rax_rcx() {
        let mut code = Code::new();
        let n = mov_reg_reg(&mut code, GPReg::RAX, GPReg::RCX);
        assert_eq!(n, 3);
        assert_eq!(code, vec![0x48, 0x8B, 0xC1]);
    }

    #[test]
    fn mov_rbp_rsp() {
        let mut code = Code::new();
        let n = mov_reg_reg(&mut code, GPReg::RBP, GPReg::RSP);
        assert_eq!(n, 3);
        assert_eq!(code, vec![0x48, 0x8B, 0xEC]);
    }

    #[test]
    fn mov_rax_indirect_r12_uses_sib() {
        let mut code = Code::new();
        let n = mov_reg_indirect(&mut code, GPReg::RAX, IndirectGPReg::R12);
        assert_eq!(n, 4);
        assert_eq!(code, vec![0x49, 0x8B, 0x04, 0x24]);
    }

    #[test]
    fn mov_rax_indirect_rbp_forces_disp8() {
        let mut code = Code::new();
        let n = mov_reg_indirect(&mut code, GPReg::RAX, IndirectGPReg::RBP);
        assert_eq!(n, 4);
        assert_eq!(code, vec![0x48, 0x8B, 0x45, 0x00]);
    }

    #[test]
    fn mov_r9_imm64_is_always_ten_bytes() {
        let mut code = Code::new();
        let n = mov_reg_imm64(&mut code, GPReg::R9, 21);
        assert_eq!(n, 10);
        assert_eq!(
            code,
            vec![0x49, 0xB9, 0x15, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn mov_indirect_rbx_rcx() {
        let mut code = Code::new();
        let n = mov_indirect_reg(&mut code, IndirectGPReg::RBX, GPReg::RCX);
        assert_eq!(n, 3);
        assert_eq!(code, vec![0x48, 0x89, 0x0B]);
    }

    #[test]
    fn mov_indirect_rdi_imm32() {
        let mut code = Code::new();
        let n = mov_indirect_imm32(&mut code, IndirectGPReg::RDI, 7);
        assert_eq!(n, 7);
        assert_eq!(code, vec![0x48, 0xC7, 0x07, 0x07, 0x00, 0x00, 0x00]);
    }
}
