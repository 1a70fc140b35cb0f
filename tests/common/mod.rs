//! An interpreter for the instruction subset the code generator emits.
//!
//! Executing the generated assembly in-process keeps the end-to-end tests
//! independent of an external assembler and linker while still checking
//! observable behavior: the simulated `rax` at `ret` is the program's exit
//! value. The interpreter also asserts that `rsp` returns to its starting
//! value at `ret`, which is exactly the stack-balance invariant the
//! generator must maintain.

use std::collections::HashMap;

const STACK_TOP: i64 = 0x0010_0000;
const STEP_LIMIT: usize = 1_000_000;

#[derive(Clone, Copy, PartialEq)]
enum Operand {
    Reg(Register),
    Imm(i64),
    Mem(Register),
}

#[derive(Clone, Copy, PartialEq)]
enum Register {
    Rax,
    Rdi,
    Rdx,
    Rbp,
    Rsp,
}

struct Machine {
    rax: i64,
    rdi: i64,
    rdx: i64,
    rbp: i64,
    rsp: i64,
    memory: HashMap<i64, i64>,
    // State behind the conditional jumps and setcc: cmp stores its two
    // operands, test stores the AND of its operands against zero.
    flags: (i64, i64),
}

impl Machine {
    fn new() -> Self {
        Self {
            rax: 0,
            rdi: 0,
            rdx: 0,
            rbp: 0,
            rsp: STACK_TOP,
            memory: HashMap::new(),
            flags: (0, 0),
        }
    }

    fn get(&self, reg: Register) -> i64 {
        match reg {
            Register::Rax => self.rax,
            Register::Rdi => self.rdi,
            Register::Rdx => self.rdx,
            Register::Rbp => self.rbp,
            Register::Rsp => self.rsp,
        }
    }

    fn set(&mut self, reg: Register, value: i64) {
        match reg {
            Register::Rax => self.rax = value,
            Register::Rdi => self.rdi = value,
            Register::Rdx => self.rdx = value,
            Register::Rbp => self.rbp = value,
            Register::Rsp => self.rsp = value,
        }
    }

    fn read(&self, operand: Operand) -> i64 {
        match operand {
            Operand::Reg(reg) => self.get(reg),
            Operand::Imm(value) => value,
            Operand::Mem(reg) => *self.memory.get(&self.get(reg)).unwrap_or(&0),
        }
    }

    fn write(&mut self, operand: Operand, value: i64) {
        match operand {
            Operand::Reg(reg) => self.set(reg, value),
            Operand::Mem(reg) => {
                let address = self.get(reg);
                self.memory.insert(address, value);
            }
            Operand::Imm(_) => panic!("cannot write to an immediate"),
        }
    }

    fn push(&mut self, value: i64) {
        self.rsp -= 8;
        self.memory.insert(self.rsp, value);
    }

    fn pop(&mut self) -> i64 {
        let value = *self.memory.get(&self.rsp).unwrap_or(&0);
        self.rsp += 8;
        value
    }

    fn set_low_byte(&mut self, value: i64) {
        self.rax = (self.rax & !0xff) | (value & 0xff);
    }
}

fn parse_register(token: &str) -> Register {
    match token {
        "rax" => Register::Rax,
        "rdi" => Register::Rdi,
        "rdx" => Register::Rdx,
        "rbp" => Register::Rbp,
        "rsp" => Register::Rsp,
        other => panic!("unsupported register: {other}"),
    }
}

fn parse_operand(tokens: &[&str]) -> Operand {
    // Either a bare operand or a `qword ptr [reg]` memory reference.
    let token = *tokens.last().expect("missing operand");
    if tokens.len() > 1 && tokens[0] != "qword" {
        panic!("unsupported operand: {tokens:?}");
    }
    if let Some(inner) = token.strip_prefix('[') {
        return Operand::Mem(parse_register(inner.trim_end_matches(']')));
    }
    match token.parse::<i64>() {
        Ok(value) => Operand::Imm(value),
        Err(_) => Operand::Reg(parse_register(token)),
    }
}

fn split_operands<'a>(tokens: &[&'a str]) -> (Operand, Operand) {
    let comma = tokens
        .iter()
        .position(|t| t.ends_with(','))
        .expect("expected a two-operand instruction");
    let mut first: Vec<&str> = tokens[..=comma].to_vec();
    let last = first.len() - 1;
    first[last] = first[last].trim_end_matches(',');
    (parse_operand(&first), parse_operand(&tokens[comma + 1..]))
}

/// Runs the generated assembly from `main` to `ret` and returns `rax`.
///
/// Panics on any instruction outside the generator's vocabulary and when
/// the stack is unbalanced at `ret`.
pub fn run(asm: &str) -> i64 {
    let lines: Vec<&str> = asm.lines().map(str::trim).collect();
    let mut labels: HashMap<&str, usize> = HashMap::new();
    for (index, line) in lines.iter().enumerate() {
        if let Some(label) = line.strip_suffix(':') {
            labels.insert(label, index);
        }
    }

    let mut machine = Machine::new();
    let mut pc = labels["main"] + 1;
    let mut steps = 0;

    loop {
        steps += 1;
        assert!(steps < STEP_LIMIT, "program did not terminate");
        let line = lines.get(pc).copied().unwrap_or("");
        pc += 1;

        if line.is_empty() || line.starts_with('.') || line.ends_with(':') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens[0] {
            "push" => {
                let value = machine.read(parse_operand(&tokens[1..]));
                machine.push(value);
            }
            "pop" => {
                let value = machine.pop();
                machine.write(parse_operand(&tokens[1..]), value);
            }
            "mov" => {
                let (dst, src) = split_operands(&tokens[1..]);
                let value = machine.read(src);
                machine.write(dst, value);
            }
            "add" => {
                let (dst, src) = split_operands(&tokens[1..]);
                let value = machine.read(dst).wrapping_add(machine.read(src));
                machine.write(dst, value);
            }
            "sub" => {
                let (dst, src) = split_operands(&tokens[1..]);
                let value = machine.read(dst).wrapping_sub(machine.read(src));
                machine.write(dst, value);
            }
            "mul" => {
                let factor = machine.read(parse_operand(&tokens[1..]));
                machine.rax = (machine.rax as u64).wrapping_mul(factor as u64) as i64;
            }
            "div" => {
                let divisor = machine.read(parse_operand(&tokens[1..])) as u64;
                assert_ne!(divisor, 0, "division by zero");
                let dividend = machine.rax as u64;
                machine.rax = (dividend / divisor) as i64;
                machine.rdx = (dividend % divisor) as i64;
            }
            "neg" => {
                let operand = parse_operand(&tokens[1..]);
                let value = machine.read(operand).wrapping_neg();
                machine.write(operand, value);
            }
            "not" => {
                let operand = parse_operand(&tokens[1..]);
                let value = !machine.read(operand);
                machine.write(operand, value);
            }
            "inc" => {
                let operand = parse_operand(&tokens[1..]);
                let value = machine.read(operand).wrapping_add(1);
                machine.write(operand, value);
            }
            "dec" => {
                let operand = parse_operand(&tokens[1..]);
                let value = machine.read(operand).wrapping_sub(1);
                machine.write(operand, value);
            }
            "cmp" => {
                let (lhs, rhs) = split_operands(&tokens[1..]);
                machine.flags = (machine.read(lhs), machine.read(rhs));
            }
            "test" => {
                // Zero flag reflects the AND of the operands, so a
                // self-compare like `test rax, rax` tests rax against zero.
                let (lhs, rhs) = split_operands(&tokens[1..]);
                machine.flags = (machine.read(lhs) & machine.read(rhs), 0);
            }
            "sete" => {
                let flag = (machine.flags.0 == machine.flags.1) as i64;
                machine.set_low_byte(flag);
            }
            "setne" => {
                let flag = (machine.flags.0 != machine.flags.1) as i64;
                machine.set_low_byte(flag);
            }
            "setl" => {
                let flag = (machine.flags.0 < machine.flags.1) as i64;
                machine.set_low_byte(flag);
            }
            "setg" => {
                let flag = (machine.flags.0 > machine.flags.1) as i64;
                machine.set_low_byte(flag);
            }
            "setle" => {
                let flag = (machine.flags.0 <= machine.flags.1) as i64;
                machine.set_low_byte(flag);
            }
            "setge" => {
                let flag = (machine.flags.0 >= machine.flags.1) as i64;
                machine.set_low_byte(flag);
            }
            "movzb" => {
                machine.rax &= 0xff;
            }
            "jmp" => {
                pc = labels[tokens[1]] + 1;
            }
            "jz" => {
                if machine.flags.0 == machine.flags.1 {
                    pc = labels[tokens[1]] + 1;
                }
            }
            "jnz" => {
                if machine.flags.0 != machine.flags.1 {
                    pc = labels[tokens[1]] + 1;
                }
            }
            "ret" => {
                assert_eq!(
                    machine.rsp, STACK_TOP,
                    "stack is unbalanced at ret (net delta {})",
                    STACK_TOP - machine.rsp
                );
                return machine.rax;
            }
            other => panic!("unsupported instruction: {other} in line '{line}'"),
        }
    }
}

/// Compiles `source` and executes the result, returning the process exit
/// status a real run would produce.
pub fn compile_and_run(source: &str) -> i64 {
    let asm = microcc::compile(source).expect("compilation failed");
    run(&asm) & 0xff
}
