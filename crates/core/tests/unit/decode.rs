//! Decoder round trips and immediate reconstruction.

use pretty_assertions::assert_eq;
use rvpipe_core::common::SimError;
use rvpipe_core::isa::decode::{branch_offset, gen_imm, jump_offset, store_offset};
use rvpipe_core::isa::instruction::{InstrKind, Instruction};

use crate::common::asm;

#[test]
fn r_type_round_trip() {
    let word = asm::add(9, 20, 21);
    let instr = Instruction::decode(word).unwrap();
    assert_eq!(instr.bits, word);
    match instr.kind {
        InstrKind::R(r) => {
            assert_eq!((r.rd, r.funct3, r.rs1, r.rs2, r.funct7), (9, 0, 20, 21, 0));
            // Re-encoding the captured fields reproduces the word.
            let reencoded =
                (r.funct7 << 25) | (r.rs2 << 20) | (r.rs1 << 15) | (r.funct3 << 12) | (r.rd << 7) | 0x33;
            assert_eq!(reencoded, word);
        }
        other => panic!("expected R-type, got {other:?}"),
    }
}

#[test]
fn i_type_round_trip() {
    let word = asm::addi(5, 6, -7);
    let instr = Instruction::decode(word).unwrap();
    match instr.kind {
        InstrKind::I(it) => {
            assert_eq!((it.rd, it.funct3, it.rs1), (5, 0, 6));
            assert_eq!(it.imm, 0xFF9); // -7 in 12 bits
        }
        other => panic!("expected I-type, got {other:?}"),
    }
    assert_eq!(gen_imm(&instr), (-7i32) as u32);
}

#[test]
fn load_round_trip() {
    let word = asm::lw(2, 3, 16);
    let instr = Instruction::decode(word).unwrap();
    match instr.kind {
        InstrKind::Load(it) => {
            assert_eq!((it.rd, it.funct3, it.rs1, it.imm), (2, 2, 3, 16));
        }
        other => panic!("expected load, got {other:?}"),
    }
    assert_eq!(gen_imm(&instr), 16);
}

#[test]
fn store_offset_reassembles_across_fields() {
    let word = asm::sw(1, 2, -12);
    let instr = Instruction::decode(word).unwrap();
    match instr.kind {
        InstrKind::S(s) => {
            assert_eq!((s.rs1, s.rs2, s.funct3), (2, 1, 2));
            assert_eq!(store_offset(&s), -12);
        }
        other => panic!("expected S-type, got {other:?}"),
    }
    assert_eq!(gen_imm(&instr), (-12i32) as u32);
}

#[test]
fn branch_offset_reassembles_scattered_bits() {
    for offset in [8, -8, 16, -4096, 4094] {
        let word = asm::beq(1, 2, offset);
        let instr = Instruction::decode(word).unwrap();
        match instr.kind {
            InstrKind::Sb(sb) => assert_eq!(branch_offset(&sb), offset, "offset {offset}"),
            other => panic!("expected SB-type, got {other:?}"),
        }
    }
}

#[test]
fn jump_offset_reassembles_scattered_bits() {
    for offset in [8, -8, 2048, -2048, 0x0F_F000, -1048576] {
        let word = asm::jal(1, offset);
        let instr = Instruction::decode(word).unwrap();
        match instr.kind {
            InstrKind::Uj(uj) => assert_eq!(jump_offset(&uj), offset, "offset {offset}"),
            other => panic!("expected UJ-type, got {other:?}"),
        }
    }
}

#[test]
fn lui_immediate_is_the_raw_upper_field() {
    let word = asm::lui(7, 0xFFFFF);
    let instr = Instruction::decode(word).unwrap();
    match instr.kind {
        InstrKind::U(u) => assert_eq!((u.rd, u.imm), (7, 0xFFFFF)),
        other => panic!("expected U-type, got {other:?}"),
    }
    // Sign-extended 20-bit field; the ALU applies the << 12.
    assert_eq!(gen_imm(&instr), u32::MAX);
}

#[test]
fn shift_immediates_take_only_the_shamt() {
    let slli = Instruction::decode(asm::slli(1, 2, 13)).unwrap();
    assert_eq!(gen_imm(&slli), 13);
    let srai = Instruction::decode(asm::srai(1, 2, 13)).unwrap();
    assert_eq!(gen_imm(&srai), 13);
}

#[test]
fn ecall_decodes_by_opcode() {
    let instr = Instruction::decode(asm::ECALL).unwrap();
    assert!(instr.is_ecall());
    assert_eq!(gen_imm(&instr), 0);
}

#[test]
fn unknown_opcodes_fail() {
    // AUIPC (0x17) is outside the supported subset.
    assert_eq!(
        Instruction::decode(0x0000_0017),
        Err(SimError::InvalidInstruction(0x17))
    );
    assert!(matches!(
        Instruction::decode(0xFFFF_FFFF),
        Err(SimError::InvalidInstruction(_))
    ));
}

#[test]
fn the_reset_word_is_tolerated() {
    let instr = Instruction::decode(0).unwrap();
    assert_eq!(instr.kind, InstrKind::Invalid);
    assert_eq!(gen_imm(&instr), 0);
}
