//! Instruction decoder and immediate/offset reconstruction.
//!
//! The decoder only splits bits into the format view selected by the opcode;
//! it does not validate funct3/funct7 combinations. The offset helpers
//! reassemble the scattered branch/jump/store immediates exactly as encoded.

use crate::common::SimError;
use crate::common::bits::sign_extend;
use crate::isa::instruction::{
    IType, InstrKind, Instruction, InstructionBits, RType, SType, SbType, UType, UjType,
};
use crate::isa::opcodes;

impl Instruction {
    /// Decodes a raw 32-bit word into an [`Instruction`] record.
    ///
    /// The low 7 bits select the format. Unknown opcodes fail with
    /// [`SimError::InvalidInstruction`], except the all-zero word, which is
    /// what pipeline registers hold before the first real instruction reaches
    /// them; it decodes to [`InstrKind::Invalid`] and flows as a no-op.
    pub fn decode(bits: u32) -> Result<Self, SimError> {
        let mut rest = bits >> 7;
        let kind = match bits.opcode() {
            opcodes::OP_REG => {
                let rd = take(&mut rest, 5);
                let funct3 = take(&mut rest, 3);
                let rs1 = take(&mut rest, 5);
                let rs2 = take(&mut rest, 5);
                let funct7 = take(&mut rest, 7);
                InstrKind::R(RType {
                    rd,
                    funct3,
                    rs1,
                    rs2,
                    funct7,
                })
            }
            opcodes::OP_IMM | opcodes::OP_LOAD => {
                let rd = take(&mut rest, 5);
                let funct3 = take(&mut rest, 3);
                let rs1 = take(&mut rest, 5);
                let imm = take(&mut rest, 12);
                let fields = IType {
                    rd,
                    funct3,
                    rs1,
                    imm,
                };
                if bits.opcode() == opcodes::OP_LOAD {
                    InstrKind::Load(fields)
                } else {
                    InstrKind::I(fields)
                }
            }
            opcodes::OP_STORE | opcodes::OP_BRANCH => {
                let imm5 = take(&mut rest, 5);
                let funct3 = take(&mut rest, 3);
                let rs1 = take(&mut rest, 5);
                let rs2 = take(&mut rest, 5);
                let imm7 = take(&mut rest, 7);
                if bits.opcode() == opcodes::OP_STORE {
                    InstrKind::S(SType {
                        imm5,
                        funct3,
                        rs1,
                        rs2,
                        imm7,
                    })
                } else {
                    InstrKind::Sb(SbType {
                        imm5,
                        funct3,
                        rs1,
                        rs2,
                        imm7,
                    })
                }
            }
            opcodes::OP_LUI => {
                let rd = take(&mut rest, 5);
                let imm = take(&mut rest, 20);
                InstrKind::U(UType { rd, imm })
            }
            opcodes::OP_JAL => {
                let rd = take(&mut rest, 5);
                let imm = take(&mut rest, 20);
                InstrKind::Uj(UjType { rd, imm })
            }
            opcodes::OP_SYSTEM => InstrKind::Ecall,
            0 if bits == 0 => InstrKind::Invalid,
            _ => return Err(SimError::InvalidInstruction(bits)),
        };
        Ok(Self { bits, kind })
    }

    /// The pipeline bubble record (`addi x0, x0, 0`).
    pub fn bubble() -> Self {
        Self {
            bits: Self::NOP_BITS,
            kind: InstrKind::I(IType {
                rd: 0,
                funct3: 0,
                rs1: 0,
                imm: 0,
            }),
        }
    }
}

/// Consumes the low `count` bits of `rest`, advancing it.
#[inline]
fn take(rest: &mut u32, count: u32) -> u32 {
    let field = *rest & ((1u32 << count) - 1);
    *rest >>= count;
    field
}

/// Byte offset to the branch target, reassembled from the SB-type fields.
///
/// Encoded order: `imm7 = imm[12|10:5]`, `imm5 = imm[11|4:1]`. The offset is
/// in multiples of 2, so the reassembled value is shifted once before the
/// 13-bit sign extension.
pub fn branch_offset(sb: &SbType) -> i32 {
    let imm12 = ((sb.imm7 >> 6) & 0x1) << 11;
    let imm11 = (sb.imm5 & 0x1) << 10;
    let imm10_5 = (sb.imm7 & 0x3F) << 4;
    let imm4_1 = (sb.imm5 >> 1) & 0xF;
    let offset = imm12 | imm11 | imm10_5 | imm4_1;
    sign_extend(offset << 1, 13)
}

/// Byte offset to the jump target, reassembled from the UJ-type immediate.
///
/// Encoded order: `imm = imm[20|10:1|11|19:12]`. The offset is in multiples
/// of 2, so the reassembled value is shifted once before the 21-bit sign
/// extension.
pub fn jump_offset(uj: &UjType) -> i32 {
    let imm20 = (uj.imm >> 19) << 19;
    let imm19_12 = (uj.imm & 0xFF) << 11;
    let imm11 = ((uj.imm >> 8) & 0x1) << 10;
    let imm10_1 = (uj.imm >> 9) & 0x3FF;
    let offset = imm20 | imm19_12 | imm11 | imm10_1;
    sign_extend(offset << 1, 21)
}

/// Byte offset to the store base, combined from the S-type halves.
pub fn store_offset(s: &SType) -> i32 {
    sign_extend((s.imm7 << 5) | s.imm5, 12)
}

/// Generates the properly sign-extended immediate for an instruction.
///
/// For I-type shifts (funct3 1 and 5) the immediate is the 5-bit shift
/// amount, recognized only under the two legal funct7 encodings; other
/// funct7 values produce 0, matching the reference fall-through.
pub fn gen_imm(instr: &Instruction) -> u32 {
    match &instr.kind {
        InstrKind::Sb(sb) => branch_offset(sb) as u32,
        InstrKind::I(it) => {
            if it.funct3 == 0x1 || it.funct3 == 0x5 {
                match (it.imm >> 5) & 0x7F {
                    0x00 | 0x20 => it.imm & 0x1F,
                    _ => 0,
                }
            } else {
                sign_extend(it.imm, 12) as u32
            }
        }
        InstrKind::Load(it) => sign_extend(it.imm, 12) as u32,
        InstrKind::S(s) => store_offset(s) as u32,
        InstrKind::Uj(uj) => jump_offset(uj) as u32,
        InstrKind::U(u) => sign_extend(u.imm, 20) as u32,
        InstrKind::R(_) | InstrKind::Ecall | InstrKind::Invalid => 0,
    }
}
