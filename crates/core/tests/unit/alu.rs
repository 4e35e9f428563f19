//! ALU operation table and purity.

use rstest::rstest;
use rvpipe_core::core::units::alu::{UNDEFINED_RESULT, control, execute_alu};

#[rstest]
#[case(control::AND, 0b1100, 0b1010, 0b1000)]
#[case(control::OR, 0b1100, 0b1010, 0b1110)]
#[case(control::ADD, 7, 35, 42)]
#[case(control::ADD, u32::MAX, 1, 0)] // wrapping
#[case(control::XOR, 0b1100, 0b1010, 0b0110)]
#[case(control::SLL, 1, 4, 16)]
#[case(control::SRL, 0x8000_0000, 4, 0x0800_0000)]
#[case(control::SUB, 5, 7, (-2i32) as u32)] // wrapping
#[case(control::SLT, (-1i32) as u32, 1, 1)] // signed compare
#[case(control::SLT, 1, (-1i32) as u32, 0)]
#[case(control::LUI, 0, 0xABCDE, 0xABCD_E000)]
#[case(control::SRA, 0xFFFF_FF00, 4, 0xFFFF_FFF0)]
#[case(control::MUL, 6, 7, 42)]
#[case(control::MUL, (-4i32) as u32, 5, (-20i32) as u32)]
fn operation_table(#[case] op: u32, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(execute_alu(a, b, op), expected);
}

#[test]
fn undefined_codes_yield_the_sentinel() {
    for code in [0xB, 0xC, 0xFF, u32::MAX] {
        assert_eq!(execute_alu(123, 456, code), UNDEFINED_RESULT);
    }
}

#[test]
fn equal_inputs_yield_equal_outputs() {
    // The ALU is a pure function; repeated evaluation cannot diverge.
    for _ in 0..3 {
        assert_eq!(
            execute_alu(0xDEAD_BEEF, 0x1234_5678, control::XOR),
            execute_alu(0xDEAD_BEEF, 0x1234_5678, control::XOR)
        );
    }
}

#[test]
fn shift_amounts_use_low_five_bits() {
    assert_eq!(execute_alu(1, 32, control::SLL), 1);
    assert_eq!(execute_alu(2, 33, control::SRL), 1);
    assert_eq!(execute_alu(0x8000_0000, 63, control::SRA), 0xFFFF_FFFF);
}
