//! Control vector and ALU-control generation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::core::pipeline::latches::IdEx;
use rvpipe_core::core::pipeline::signals::ControlSignals;
use rvpipe_core::core::units::alu::{control, gen_alu_control};

/// Rows of the opcode -> control truth table, as
/// (alu_op2, alu_op1, alu_op0, alu_src, branch, mem_read, mem_write,
///  reg_write, mem_to_reg).
#[rstest]
#[case(0x33, (false, true, false, false, false, false, false, true, false))]
#[case(0x13, (false, true, true, true, false, false, false, true, false))]
#[case(0x03, (false, false, false, true, false, true, false, true, true))]
#[case(0x23, (false, false, false, true, false, false, true, false, false))]
#[case(0x63, (false, false, true, false, true, false, false, false, false))]
#[case(0x37, (true, false, false, true, false, false, false, true, false))]
#[case(0x6F, (false, false, false, true, true, false, false, true, false))]
fn control_truth_table(
    #[case] opcode: u32,
    #[case] expected: (bool, bool, bool, bool, bool, bool, bool, bool, bool),
) {
    let c = ControlSignals::for_opcode(opcode);
    let row = (
        c.alu_op2,
        c.alu_op1,
        c.alu_op0,
        c.alu_src,
        c.branch,
        c.mem_read,
        c.mem_write,
        c.reg_write,
        c.mem_to_reg,
    );
    assert_eq!(row, expected);
}

#[test]
fn ecall_and_unknown_opcodes_are_bubbles() {
    assert_eq!(ControlSignals::for_opcode(0x73), ControlSignals::default());
    assert_eq!(ControlSignals::for_opcode(0x00), ControlSignals::default());
}

fn idex(ctrl: ControlSignals, funct3: u32, funct7_30: bool, funct7_25: bool) -> IdEx {
    IdEx {
        ctrl,
        funct3,
        funct7_30,
        funct7_25,
        ..IdEx::default()
    }
}

#[test]
fn memory_and_jump_group_adds() {
    let loads = ControlSignals::for_opcode(0x03);
    assert_eq!(gen_alu_control(&idex(loads, 0x2, false, false)), control::ADD);
    let jal = ControlSignals::for_opcode(0x6F);
    assert_eq!(gen_alu_control(&idex(jal, 0, false, false)), control::ADD);
}

#[test]
fn lui_selects_the_shift_path() {
    let lui = ControlSignals::for_opcode(0x37);
    assert_eq!(gen_alu_control(&idex(lui, 0, false, false)), control::LUI);
}

#[test]
fn branches_subtract() {
    let beq = ControlSignals::for_opcode(0x63);
    assert_eq!(gen_alu_control(&idex(beq, 0x0, false, false)), control::SUB);
}

#[rstest]
#[case(0x0, false, false, control::ADD)]
#[case(0x0, false, true, control::MUL)]
#[case(0x0, true, false, control::SUB)]
#[case(0x1, false, false, control::SLL)]
#[case(0x2, false, false, control::SLT)]
#[case(0x4, false, false, control::XOR)]
#[case(0x5, false, false, control::SRL)]
#[case(0x5, true, false, control::SRA)]
#[case(0x6, false, false, control::OR)]
#[case(0x7, false, false, control::AND)]
fn r_type_funct_selection(
    #[case] funct3: u32,
    #[case] funct7_30: bool,
    #[case] funct7_25: bool,
    #[case] expected: u32,
) {
    let r = ControlSignals::for_opcode(0x33);
    assert_eq!(gen_alu_control(&idex(r, funct3, funct7_30, funct7_25)), expected);
}

#[rstest]
#[case(0x0, false, control::ADD)]
#[case(0x5, false, control::SRL)]
#[case(0x5, true, control::SRA)]
#[case(0x7, false, control::AND)]
fn i_type_funct_selection(#[case] funct3: u32, #[case] funct7_30: bool, #[case] expected: u32) {
    let i = ControlSignals::for_opcode(0x13);
    assert_eq!(gen_alu_control(&idex(i, funct3, funct7_30, false)), expected);
}

#[test]
fn bubble_records_stay_harmless() {
    // An all-zero record selects ADD; zero operands keep the result zero.
    let bubble = idex(ControlSignals::default(), 0, false, false);
    assert_eq!(gen_alu_control(&bubble), control::ADD);
}
