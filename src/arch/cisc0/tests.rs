//! cisc0 test suite

use crate::arch::cisc0::ArithmeticStyle as Arith;
use crate::arch::cisc0::{
    disassemble, link, link_capacity, read_records, translate_instruction, write_records,
    BufferConsole, CompareStyle, Comparison, Core, LogicalStyle, MemoryAccess, Misc, Operation,
    OperationCode, Record, ShiftAmount, Source, Target, ADDRESS_REGISTER, CALL_STACK_POINTER,
    INSTRUCTION_POINTER, STACK_POINTER, VALUE_REGISTER,
};
use crate::error::Error;
use crate::maths::Bitmask;
use proptest::prelude::*;
use std::io::Cursor;

macro_rules! assert_cisc0 {
    ($data: expr, $instr: expr, $len: expr) => {
        assert_eq!(disassemble(&$data).unwrap(), ($instr, $len))
    };
}

macro_rules! assert_cisc0_err {
    ($data: expr, $error: pat) => {
        assert!(matches!(disassemble(&$data).unwrap_err(), $error))
    };
}

fn core() -> Core<BufferConsole> {
    Core::with_console(1024, BufferConsole::default()).unwrap()
}

fn set(destination: u8, value: u32) -> Operation {
    Operation::Set {
        mask: Bitmask::FULL,
        destination,
        value,
    }
}

fn arith(style: Arith, destination: u8, source: u8) -> Operation {
    Operation::Arithmetic {
        style,
        destination,
        source: Source::Register(source),
    }
}

const TERMINATE: Operation = Operation::Misc(Misc::Terminate);

/// Load `ops` at address zero and run them to completion.
fn run(ops: &[Operation]) -> (Core<BufferConsole>, Result<(), Error>) {
    let mut core = core();
    core.write_operations(0, ops).unwrap();
    let result = core.run();

    (core, result)
}

/// Disassembly tests
#[test]
fn cisc0_disasm() {
    assert_cisc0!(
        vec![0x0101],
        arith(Arith::Add, 0, 1),
        1
    );
    assert_cisc0!(
        vec![0x3261],
        arith(Arith::Div, 3, 2),
        1
    );
    assert_cisc0!(vec![0x0019], TERMINATE, 1);
    assert_cisc0!(vec![0x0009], Operation::Misc(Misc::Return), 1);
    assert_cisc0!(vec![0x5029], Operation::Misc(Misc::GetChar(5)), 1);
    assert_cisc0!(vec![0x5039], Operation::Misc(Misc::PutChar(5)), 1);
    assert_cisc0!(
        vec![0x21B2],
        Operation::Shift {
            left: true,
            destination: 2,
            amount: ShiftAmount::Immediate(3),
        },
        1
    );
    assert_cisc0!(
        vec![0x2302],
        Operation::Shift {
            left: false,
            destination: 2,
            amount: ShiftAmount::Register(3),
        },
        1
    );
    assert_cisc0!(
        vec![0x1310],
        Operation::Memory(MemoryAccess::Store {
            mask: Bitmask::LOWER,
            offset: 1,
        }),
        1
    );
    assert_cisc0!(
        vec![0x0F00],
        Operation::Memory(MemoryAccess::Load {
            mask: Bitmask::FULL,
            offset: 0,
        }),
        1
    );
    assert_cisc0!(
        vec![0x7F20],
        Operation::Memory(MemoryAccess::Push {
            mask: Bitmask::FULL,
            register: 7,
        }),
        1
    );
    assert_cisc0!(
        vec![0x30C4],
        Operation::Compare(Comparison::MoveFromCondition(3)),
        1
    );
    assert_cisc0!(
        vec![0x30E4],
        Operation::Compare(Comparison::MoveToCondition(3)),
        1
    );
    assert_cisc0!(
        vec![0x1F26],
        Operation::Move {
            mask: Bitmask::from_nibble(0b0010),
            destination: 1,
            source: 15,
        },
        1
    );
    assert_cisc0!(
        vec![0x1208],
        Operation::Swap {
            destination: 1,
            source: 2,
        },
        1
    );
    assert_cisc0!(
        vec![0x0035, 0x0010, 0x0000],
        Operation::Branch {
            call: true,
            conditional: false,
            target: Target::Immediate(0x10),
        },
        3
    );
    assert_cisc0!(
        vec![0x4045],
        Operation::Branch {
            call: false,
            conditional: true,
            target: Target::Register(4),
        },
        1
    );
}

#[test]
fn cisc0_decode_length() {
    assert_cisc0!(
        vec![0x2007],
        Operation::Set {
            mask: Bitmask::NONE,
            destination: 2,
            value: 0,
        },
        1
    );
    assert_cisc0!(
        vec![0x0307, 0x0005],
        Operation::Set {
            mask: Bitmask::LOWER,
            destination: 0,
            value: 5,
        },
        2
    );
    assert_cisc0!(
        vec![0x0C07, 0x1234],
        Operation::Set {
            mask: Bitmask::UPPER,
            destination: 0,
            value: 0x1234_0000,
        },
        2
    );
    assert_cisc0!(
        vec![0x1F07, 0xFFFF, 0xFFFF],
        set(1, 0xFFFF_FFFF),
        3
    );
    assert_cisc0!(
        vec![0x0511, 0x00AB, 0xCDEF],
        Operation::Arithmetic {
            style: Arith::Add,
            destination: 0,
            source: Source::Immediate {
                mask: Bitmask::from_nibble(0b0101),
                value: 0x00EF_00AB,
            },
        },
        3
    );
}

#[test]
fn cisc0_decode_errors() {
    assert_cisc0_err!(vec![0x000A], Error::IllegalOpcode(10));
    assert_cisc0_err!(vec![0x000F], Error::IllegalOpcode(15));
    assert_cisc0_err!(
        vec![0x00E1],
        Error::IllegalStyle {
            group: OperationCode::Arithmetic,
            style: 7,
        }
    );
    assert_cisc0_err!(
        vec![0x00A3],
        Error::IllegalStyle {
            group: OperationCode::Logical,
            style: 5,
        }
    );
    assert_cisc0_err!(
        vec![0x00D4],
        Error::IllegalStyle {
            group: OperationCode::Compare,
            style: 6,
        }
    );
    assert_cisc0_err!(
        vec![0x0049],
        Error::IllegalStyle {
            group: OperationCode::Misc,
            style: 4,
        }
    );
    assert_cisc0_err!(vec![0x0F07, 0x0001], Error::IllegalAddress(2));
    assert_cisc0_err!(Vec::<u16>::new(), Error::IllegalAddress(0));
}

#[test]
fn cisc0_encode() {
    let ops = vec![
        arith(Arith::Max, 4, 9),
        Operation::Logical {
            style: LogicalStyle::Nand,
            destination: 1,
            source: Source::Immediate {
                mask: Bitmask::UPPER,
                value: 0xBEEF_0000,
            },
        },
        Operation::Compare(Comparison::Test {
            style: CompareStyle::GreaterThanOrEqualTo,
            destination: 2,
            source: Source::Immediate {
                mask: Bitmask::NONE,
                value: 0,
            },
        }),
        Operation::Shift {
            left: true,
            destination: 3,
            amount: ShiftAmount::Immediate(31),
        },
        Operation::Branch {
            call: false,
            conditional: true,
            target: Target::Immediate(0x00AB_CDEF),
        },
        Operation::Memory(MemoryAccess::Pop {
            mask: Bitmask::from_nibble(0b0110),
            register: 14,
        }),
        set(10, 0x1234_5678),
        Operation::Misc(Misc::PutChar(1)),
    ];

    for op in ops {
        let words = op.encode().unwrap();

        assert_eq!(words.len(), op.word_count());
        assert_eq!(disassemble(&words).unwrap(), (op, words.len()));
    }

    assert_eq!(set(0, 5).encode().unwrap(), vec![0x0F07, 0x0005, 0x0000]);
    assert_eq!(TERMINATE.encode().unwrap(), vec![0x0019]);
}

#[test]
fn cisc0_encode_out_of_range() {
    let too_wide = [
        Operation::Shift {
            left: true,
            destination: 1,
            amount: ShiftAmount::Immediate(40),
        },
        Operation::Shift {
            left: false,
            destination: 1,
            amount: ShiftAmount::Immediate(32),
        },
        arith(Arith::Add, 16, 0),
        arith(Arith::Add, 0, 16),
        Operation::Memory(MemoryAccess::Load {
            mask: Bitmask::FULL,
            offset: 16,
        }),
        Operation::Memory(MemoryAccess::Push {
            mask: Bitmask::FULL,
            register: 0x20,
        }),
        Operation::Set {
            mask: Bitmask::LOWER,
            destination: 0,
            value: 0x0001_0000,
        },
        Operation::Misc(Misc::PutChar(0xFF)),
    ];

    for op in too_wide.iter() {
        assert!(
            matches!(op.encode(), Err(Error::OperandOutOfRange { .. })),
            "{:?} should not encode",
            op
        );
    }

    let mut core = core();
    assert!(matches!(
        core.write_operations(0, &too_wide[..1]),
        Err(Error::OperandOutOfRange {
            operand: "shift amount",
            value: 40,
        })
    ));
}

#[test]
fn cisc0_display() {
    assert_eq!(format!("{}", arith(Arith::Add, 0, 1)), "add r0, r1");
    assert_eq!(
        format!(
            "{}",
            Operation::Set {
                mask: Bitmask::LOWER,
                destination: 0,
                value: 5,
            }
        ),
        "set r0, 0x00000005 [0011]"
    );
    assert_eq!(
        format!(
            "{}",
            Operation::Branch {
                call: true,
                conditional: false,
                target: Target::Immediate(0x10),
            }
        ),
        "call 0x000010"
    );
    assert_eq!(format!("{}", arith(Arith::Sub, 11, 12)), "sub value, addr");
}

#[test]
fn cisc0_translate() {
    assert_eq!(translate_instruction(0x0101, 0, 0), "add r0, r1");
    assert_eq!(translate_instruction(0x0019, 0xFFFF, 0xFFFF), "terminate");
    assert_eq!(translate_instruction(0x000A, 0, 0), "<Illegal opcode 0xA>");
}

#[test]
fn cisc0_address_register_masked() {
    let mut core = core();

    core.register_mut(ADDRESS_REGISTER).set_address(0x1234_5678);
    assert_eq!(core.register(ADDRESS_REGISTER).address(), 0x1234_5678 & 0x3FF);

    core.register_mut(0).set_address(0x1234_5678);
    assert_eq!(core.register(0).address(), 0x1234_5678);
}

#[test]
fn cisc0_bad_capacity() {
    assert!(matches!(
        Core::with_console(1000, BufferConsole::default()),
        Err(Error::IllegalCapacity(1000))
    ));
}

#[test]
fn cisc0_program() {
    let (core, result) = run(&[
        set(0, 5),
        set(1, 3),
        arith(Arith::Add, 0, 1),
        TERMINATE,
    ]);

    result.unwrap();
    assert_eq!(core.register(0).address(), 8);
    assert!(!core.keep_executing());
}

#[test]
fn cisc0_divide_by_zero() {
    let (core, result) = run(&[set(0, 10), arith(Arith::Div, 0, 1), TERMINATE]);

    assert!(matches!(result, Err(Error::DivideByZero)));
    assert!(!core.keep_executing());
    assert_eq!(core.instruction_address(), 3);
    assert_eq!(core.register(0).address(), 10);
}

#[test]
fn cisc0_remainder_by_zero() {
    let (_, result) = run(&[arith(Arith::Rem, 0, 1)]);

    assert!(matches!(result, Err(Error::DivideByZero)));
}

#[test]
fn cisc0_arithmetic_wraps() {
    let (core, result) = run(&[
        set(0, 0),
        set(1, 1),
        arith(Arith::Sub, 0, 1),
        set(2, 0x8000_0000),
        set(3, 2),
        arith(Arith::Mul, 2, 3),
        TERMINATE,
    ]);

    result.unwrap();
    assert_eq!(core.register(0).address(), 0xFFFF_FFFF);
    assert_eq!(core.register(2).address(), 0);
}

#[test]
fn cisc0_min_max_write_value() {
    let (core, result) = run(&[
        set(0, 3),
        set(1, 7),
        arith(Arith::Min, 0, 1),
        set(2, 0),
        arith(Arith::Add, 2, VALUE_REGISTER),
        arith(Arith::Max, 0, 1),
        TERMINATE,
    ]);

    result.unwrap();
    assert_eq!(core.register(2).address(), 3);
    assert_eq!(core.register(VALUE_REGISTER).address(), 7);
    assert_eq!(core.register(0).address(), 3);
}

#[test]
fn cisc0_logical() {
    let (core, result) = run(&[
        set(0, 0x0F0F_0F0F),
        Operation::Logical {
            style: LogicalStyle::Not,
            destination: 0,
            source: Source::Register(5),
        },
        set(1, 0xFF00_FF00),
        Operation::Logical {
            style: LogicalStyle::Xor,
            destination: 1,
            source: Source::Immediate {
                mask: Bitmask::LOWER,
                value: 0xFFFF,
            },
        },
        TERMINATE,
    ]);

    result.unwrap();
    assert_eq!(core.register(0).address(), 0xF0F0_F0F0);
    assert_eq!(core.register(1).address(), 0xFF00_00FF);
}

#[test]
fn cisc0_shift_overflow() {
    let (core, result) = run(&[
        set(0, 0xFFFF_FFFF),
        set(1, 40),
        Operation::Shift {
            left: true,
            destination: 0,
            amount: ShiftAmount::Register(1),
        },
        set(2, 0x8000_0000),
        Operation::Shift {
            left: false,
            destination: 2,
            amount: ShiftAmount::Immediate(31),
        },
        TERMINATE,
    ]);

    result.unwrap();
    assert_eq!(core.register(0).address(), 0);
    assert_eq!(core.register(2).address(), 1);
}

#[test]
fn cisc0_compare_and_branch() {
    let mut core = core();
    let skip = core
        .write_operations(
            0,
            &[
                set(0, 1),
                Operation::Compare(Comparison::Test {
                    style: CompareStyle::LessThan,
                    destination: 0,
                    source: Source::Register(1),
                }),
                Operation::Compare(Comparison::MoveFromCondition(2)),
            ],
        )
        .unwrap();
    let after = skip + 4;
    core.write_operations(
        skip,
        &[
            Operation::Branch {
                call: false,
                conditional: true,
                target: Target::Immediate(0x200),
            },
            Operation::Compare(Comparison::Test {
                style: CompareStyle::GreaterThan,
                destination: 0,
                source: Source::Register(1),
            }),
        ],
    )
    .unwrap();
    core.write_operations(
        after,
        &[
            Operation::Compare(Comparison::MoveFromCondition(3)),
            Operation::Branch {
                call: false,
                conditional: true,
                target: Target::Immediate(0x200),
            },
        ],
    )
    .unwrap();
    core.write_operations(0x200, &[TERMINATE]).unwrap();

    core.run().unwrap();
    assert_eq!(core.register(2).address(), 0);
    assert_eq!(core.register(3).integer(), -1);
    assert_eq!(core.instruction_address(), 0x200);
}

#[test]
fn cisc0_move_to_condition() {
    let (core, result) = run(&[
        set(0, 42),
        Operation::Compare(Comparison::MoveToCondition(0)),
        TERMINATE,
    ]);

    result.unwrap();
    assert!(core.condition());
}

#[test]
fn cisc0_call_return() {
    let mut core = core();
    core.write_operations(
        0,
        &[
            Operation::Branch {
                call: true,
                conditional: true,
                target: Target::Immediate(0x10),
            },
            TERMINATE,
        ],
    )
    .unwrap();
    core.write_operations(0x10, &[Operation::Misc(Misc::Return)])
        .unwrap();

    core.run().unwrap();
    assert_eq!(core.instruction_address(), 3);
    assert_eq!(core.register(INSTRUCTION_POINTER).address(), 4);
    assert_eq!(core.register(CALL_STACK_POINTER).address(), 0);
    assert_eq!(core.register(STACK_POINTER).address(), 0);
    assert_eq!(core.read_memory(0x3FE).unwrap(), 3);
    assert_eq!(core.read_memory(0x3FF).unwrap(), 0);
}

#[test]
fn cisc0_call_register() {
    let mut core = core();
    core.write_operations(
        0,
        &[
            set(4, 0x20),
            Operation::Branch {
                call: true,
                conditional: false,
                target: Target::Register(4),
            },
        ],
    )
    .unwrap();
    core.write_operations(0x20, &[TERMINATE]).unwrap();

    core.run().unwrap();
    assert_eq!(core.instruction_address(), 0x20);
    assert_eq!(core.register(CALL_STACK_POINTER).address(), 0x3FE);
    assert_eq!(core.read_memory(0x3FE).unwrap(), 4);
}

#[test]
fn cisc0_store_lower_only() {
    let mut core = core();
    core.register_mut(ADDRESS_REGISTER).set_address(0x100);
    core.register_mut(VALUE_REGISTER).set_address(0xAABB_CCDD);
    core.write_memory(0x101, 0x1111).unwrap();
    core.write_operations(
        0,
        &[
            Operation::Memory(MemoryAccess::Store {
                mask: Bitmask::LOWER,
                offset: 0,
            }),
            TERMINATE,
        ],
    )
    .unwrap();

    core.run().unwrap();
    assert_eq!(core.read_memory(0x100).unwrap(), 0xCCDD);
    assert_eq!(core.read_memory(0x101).unwrap(), 0x1111);
}

#[test]
fn cisc0_store_upper_only() {
    let mut core = core();
    core.register_mut(ADDRESS_REGISTER).set_address(0x100);
    core.register_mut(VALUE_REGISTER).set_address(0xAABB_CCDD);
    core.write_memory(0x102, 0x1111).unwrap();
    core.write_operations(
        0,
        &[
            Operation::Memory(MemoryAccess::Store {
                mask: Bitmask::UPPER,
                offset: 1,
            }),
            TERMINATE,
        ],
    )
    .unwrap();

    core.run().unwrap();
    assert_eq!(core.read_memory(0x101).unwrap(), 0);
    assert_eq!(core.read_memory(0x102).unwrap(), 0xAABB);
}

#[test]
fn cisc0_store_merge() {
    let mut core = core();
    core.register_mut(ADDRESS_REGISTER).set_address(0x100);
    core.register_mut(VALUE_REGISTER).set_address(0xAABB_CCDD);
    core.write_memory(0x100, 0x1234).unwrap();
    core.write_memory(0x101, 0x5678).unwrap();
    core.write_operations(
        0,
        &[
            Operation::Memory(MemoryAccess::Store {
                mask: Bitmask::from_nibble(0b1001),
                offset: 0,
            }),
            TERMINATE,
        ],
    )
    .unwrap();

    core.run().unwrap();
    assert_eq!(core.read_memory(0x100).unwrap(), 0x12DD);
    assert_eq!(core.read_memory(0x101).unwrap(), 0xAA78);
}

#[test]
fn cisc0_load_partial() {
    let mut core = core();
    core.register_mut(ADDRESS_REGISTER).set_address(0x100);
    core.register_mut(VALUE_REGISTER).set_address(0xFFFF_FFFF);
    core.write_memory(0x100, 0x5678).unwrap();
    core.write_memory(0x101, 0x1234).unwrap();
    core.write_operations(
        0,
        &[
            Operation::Memory(MemoryAccess::Load {
                mask: Bitmask::from_nibble(0b0110),
                offset: 0,
            }),
            TERMINATE,
        ],
    )
    .unwrap();

    core.run().unwrap();
    assert_eq!(core.register(VALUE_REGISTER).address(), 0x0034_5600);
}

#[test]
fn cisc0_load_out_of_bounds() {
    let mut core = core();
    core.register_mut(ADDRESS_REGISTER).set_address(0x3FF);
    core.write_operations(
        0,
        &[Operation::Memory(MemoryAccess::Load {
            mask: Bitmask::FULL,
            offset: 0,
        })],
    )
    .unwrap();

    assert!(matches!(core.run(), Err(Error::IllegalAddress(0x400))));
    assert!(!core.keep_executing());
}

#[test]
fn cisc0_push_pop() {
    let (core, result) = run(&[
        set(0, 0xDEAD_BEEF),
        Operation::Memory(MemoryAccess::Push {
            mask: Bitmask::FULL,
            register: 0,
        }),
        Operation::Memory(MemoryAccess::Pop {
            mask: Bitmask::FULL,
            register: 1,
        }),
        TERMINATE,
    ]);

    result.unwrap();
    assert_eq!(core.register(1).address(), 0xDEAD_BEEF);
    assert_eq!(core.register(STACK_POINTER).address(), 0);
    assert_eq!(core.register(CALL_STACK_POINTER).address(), 0);
    assert_eq!(core.read_memory(0x3FF).unwrap(), 0xDEAD);
    assert_eq!(core.read_memory(0x3FE).unwrap(), 0xBEEF);
}

#[test]
fn cisc0_push_pop_partial() {
    let (core, result) = run(&[
        set(0, 0xDEAD_BEEF),
        set(1, 0x1111_1111),
        Operation::Memory(MemoryAccess::Push {
            mask: Bitmask::from_nibble(0b0001),
            register: 0,
        }),
        Operation::Memory(MemoryAccess::Pop {
            mask: Bitmask::LOWER,
            register: 1,
        }),
        TERMINATE,
    ]);

    result.unwrap();
    assert_eq!(core.read_memory(0x3FF).unwrap(), 0x00EF);
    assert_eq!(core.register(1).address(), 0x1111_00EF);
    assert_eq!(core.register(STACK_POINTER).address(), 0);
}

#[test]
fn cisc0_move_swap() {
    let (core, result) = run(&[
        set(1, 0x1234_5678),
        Operation::Move {
            mask: Bitmask::LOWER,
            destination: 0,
            source: 1,
        },
        set(2, 9),
        Operation::Swap {
            destination: 1,
            source: 2,
        },
        Operation::Swap {
            destination: 2,
            source: 2,
        },
        TERMINATE,
    ]);

    result.unwrap();
    assert_eq!(core.register(0).address(), 0x5678);
    assert_eq!(core.register(1).address(), 9);
    assert_eq!(core.register(2).address(), 0x1234_5678);
}

#[test]
fn cisc0_console() {
    let mut core = Core::with_console(1024, BufferConsole::new(b"A")).unwrap();
    core.write_operations(
        0,
        &[
            Operation::Misc(Misc::GetChar(0)),
            Operation::Misc(Misc::PutChar(0)),
            Operation::Misc(Misc::GetChar(1)),
            TERMINATE,
        ],
    )
    .unwrap();

    core.run().unwrap();
    assert_eq!(core.register(0).address(), 0x41);
    assert_eq!(core.register(1).integer(), -1);
    assert_eq!(core.console().output(), b"A");
}

#[test]
fn cisc0_step() {
    let mut core = core();
    core.write_operations(0, &[set(0, 5), TERMINATE]).unwrap();

    assert_eq!(core.step().unwrap(), set(0, 5));
    assert!(core.keep_executing());
    assert_eq!(core.register(INSTRUCTION_POINTER).address(), 3);

    assert_eq!(core.step().unwrap(), TERMINATE);
    assert!(!core.keep_executing());
}

#[test]
fn cisc0_fetch_wraps() {
    let mut core = core();
    core.register_mut(INSTRUCTION_POINTER).set_address(0x3FF);
    core.write_memory(0x3FF, 0xBEEF).unwrap();

    assert_eq!(core.next_word().unwrap(), 0xBEEF);
    assert_eq!(core.register(INSTRUCTION_POINTER).address(), 0);
}

#[test]
fn cisc0_host_binding() {
    let mut core = core();

    core.set_register(3, 0xCAFE).unwrap();
    assert_eq!(core.get_register(3).unwrap(), 0xCAFE);
    assert!(matches!(
        core.get_register(16),
        Err(Error::IllegalRegisterIndex(16))
    ));
    assert!(matches!(
        core.set_register(-1, 0),
        Err(Error::IllegalRegisterIndex(-1))
    ));

    core.write_memory(0x20, 0x4242).unwrap();
    assert_eq!(core.read_memory(0x20).unwrap(), 0x4242);
    assert!(matches!(
        core.read_memory(1024),
        Err(Error::IllegalAddress(1024))
    ));
}

#[test]
fn cisc0_image() {
    let mut core = core();
    core.set_register(0, 0x1234_5678).unwrap();
    core.set_register(15, 0x10).unwrap();
    core.write_memory(0x10, 0x0019).unwrap();

    let mut image = Vec::new();
    core.dump(&mut image).unwrap();
    assert_eq!(image.len(), 16 * 4 + 1024 * 2);
    assert_eq!(&image[0..4], &[0x78, 0x56, 0x34, 0x12]);

    let mut copy = Core::with_console(1024, BufferConsole::default()).unwrap();
    copy.install(&mut Cursor::new(&image)).unwrap();
    assert_eq!(copy.registers(), core.registers());
    assert_eq!(copy.memory(), core.memory());

    copy.run().unwrap();
    assert_eq!(copy.instruction_address(), 0x10);
}

#[test]
fn cisc0_image_short() {
    let mut core = core();

    assert!(matches!(
        core.install(&mut Cursor::new(vec![0u8; 100])),
        Err(Error::Io(_))
    ));
}

#[test]
fn cisc0_records() {
    let records = vec![
        Record::Capacity(0x800),
        Record::Register {
            index: 15,
            value: 0x10,
        },
        Record::Memory {
            address: 0x10,
            value: 0x0019,
        },
    ];

    let mut object = Vec::new();
    write_records(&mut object, &records).unwrap();
    assert_eq!(object.len(), 24);
    assert_eq!(&object[8..16], &[1, 0, 0x10, 0, 0, 0, 15, 0]);

    assert_eq!(read_records(&mut Cursor::new(&object)).unwrap(), records);
}

#[test]
fn cisc0_records_malformed() {
    assert!(matches!(
        read_records(&mut Cursor::new(vec![0u8; 11])),
        Err(Error::UnalignedObject(3))
    ));
    assert!(matches!(
        read_records(&mut Cursor::new(vec![3, 0, 0, 0, 0, 0, 0, 0])),
        Err(Error::IllegalSection(3))
    ));
}

#[test]
fn cisc0_link() {
    let records = vec![
        Record::Capacity(0x800),
        Record::Register {
            index: 15,
            value: 0x10,
        },
        Record::Register {
            index: 0,
            value: 0xFFFF_FFFF,
        },
        Record::Memory {
            address: 0x10,
            value: 0x0019,
        },
    ];

    let mut core = link(&records, 1024, BufferConsole::default()).unwrap();
    assert_eq!(core.capacity(), 0x800);
    assert_eq!(core.register(0).address(), 0xFFFF_FFFF);

    core.run().unwrap();
    assert_eq!(core.instruction_address(), 0x10);
}

#[test]
fn cisc0_link_capacity() {
    assert_eq!(link_capacity(&[], 1024).unwrap(), 1024);
    assert_eq!(link_capacity(&[Record::Capacity(1000)], 16).unwrap(), 1024);
    assert_eq!(link_capacity(&[Record::Capacity(4)], 16).unwrap(), 16);
    assert!(matches!(
        link_capacity(&[Record::Capacity(0x8000_0001)], 16),
        Err(Error::IllegalCapacity(0x8000_0001))
    ));
}

fn any_register() -> impl Strategy<Value = u8> {
    0u8..16
}

fn any_bitmask() -> impl Strategy<Value = Bitmask> {
    (0u16..16).prop_map(Bitmask::from_nibble)
}

fn any_source() -> BoxedStrategy<Source> {
    prop_oneof![
        any_register().prop_map(Source::Register),
        (any_bitmask(), any::<u32>()).prop_map(|(mask, value)| Source::Immediate {
            mask,
            value: value & mask.expand(),
        }),
    ]
    .boxed()
}

fn any_memory_access() -> BoxedStrategy<MemoryAccess> {
    (0u8..4, any_bitmask(), 0u8..16)
        .prop_map(|(style, mask, operand)| match style {
            0 => MemoryAccess::Load {
                mask,
                offset: operand,
            },
            1 => MemoryAccess::Store {
                mask,
                offset: operand,
            },
            2 => MemoryAccess::Push {
                mask,
                register: operand,
            },
            _ => MemoryAccess::Pop {
                mask,
                register: operand,
            },
        })
        .boxed()
}

fn any_comparison() -> BoxedStrategy<Comparison> {
    prop_oneof![
        (0u16..6, any_register(), any_source()).prop_map(|(style, destination, source)| {
            Comparison::Test {
                style: CompareStyle::from_bits(style).unwrap(),
                destination,
                source,
            }
        }),
        any_register().prop_map(Comparison::MoveFromCondition),
        any_register().prop_map(Comparison::MoveToCondition),
    ]
    .boxed()
}

fn any_misc() -> BoxedStrategy<Misc> {
    prop_oneof![
        Just(Misc::Return),
        Just(Misc::Terminate),
        any_register().prop_map(Misc::GetChar),
        any_register().prop_map(Misc::PutChar),
    ]
    .boxed()
}

/// Every well-formed instruction, in every group.
fn any_operation() -> BoxedStrategy<Operation> {
    prop_oneof![
        any_memory_access().prop_map(Operation::Memory),
        (0u16..7, any_register(), any_source()).prop_map(|(style, destination, source)| {
            Operation::Arithmetic {
                style: Arith::from_bits(style).unwrap(),
                destination,
                source,
            }
        }),
        (any::<bool>(), any_register(), 0u8..32, any::<bool>()).prop_map(
            |(left, destination, n, immediate)| Operation::Shift {
                left,
                destination,
                amount: if immediate {
                    ShiftAmount::Immediate(n)
                } else {
                    ShiftAmount::Register(n & 0x0F)
                },
            }
        ),
        (0u16..5, any_register(), any_source()).prop_map(|(style, destination, source)| {
            Operation::Logical {
                style: LogicalStyle::from_bits(style).unwrap(),
                destination,
                source,
            }
        }),
        any_comparison().prop_map(Operation::Compare),
        (any::<bool>(), any::<bool>(), any::<u32>(), any::<bool>()).prop_map(
            |(call, conditional, address, immediate)| Operation::Branch {
                call,
                conditional,
                target: if immediate {
                    Target::Immediate(address)
                } else {
                    Target::Register((address & 0x0F) as u8)
                },
            }
        ),
        (any_bitmask(), any_register(), any_register()).prop_map(|(mask, destination, source)| {
            Operation::Move {
                mask,
                destination,
                source,
            }
        }),
        (any_bitmask(), any_register(), any::<u32>()).prop_map(|(mask, destination, value)| {
            Operation::Set {
                mask,
                destination,
                value: value & mask.expand(),
            }
        }),
        (any_register(), any_register()).prop_map(|(destination, source)| Operation::Swap {
            destination,
            source,
        }),
        any_misc().prop_map(Operation::Misc),
    ]
    .boxed()
}

proptest! {
    #[test]
    fn cisc0_encode_decode(op in any_operation()) {
        let words = op.encode().unwrap();

        prop_assert_eq!(words.len(), op.word_count());
        prop_assert_eq!(disassemble(&words).unwrap(), (op, words.len()));
    }

    #[test]
    fn cisc0_encode_rejects_wide_shift(n in 32u8.., left in any::<bool>()) {
        let op = Operation::Shift {
            left,
            destination: 0,
            amount: ShiftAmount::Immediate(n),
        };

        prop_assert!(matches!(op.encode(), Err(Error::OperandOutOfRange { .. })), "{:?}", op);
    }
}
