use utils::DiagnosticEmitter;

use crate::ir::{CmdId, Instruction};

/// Parses the textual instruction list format:
///
/// ```text
/// <N>
/// <id> ACTION
/// <id> BRANCH <target-id>
/// <id> JUMP <target-id>
/// ```
///
/// Fields are whitespace separated, blank lines are skipped. Any parse
/// error is reported through the [`DiagnosticEmitter`] with the offending
/// line number and aborts parsing; there is no recovery.
pub struct Parser<'src> {
    lines: core::iter::Enumerate<core::str::Lines<'src>>,
    last_line: u32,
    diag: &'src mut DiagnosticEmitter,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, diag: &'src mut DiagnosticEmitter) -> Self {
        Parser {
            lines: source.lines().enumerate(),
            last_line: 1,
            diag,
        }
    }

    pub fn parse(mut self) -> Option<Vec<Instruction>> {
        let Some((line, fields)) = self.next_record() else {
            self.diag.error(self.last_line, "Expected instruction count.");
            return None;
        };
        let count = self.parse_count(line, &fields)?;

        let mut program = Vec::with_capacity(count);
        while program.len() < count {
            let Some((line, fields)) = self.next_record() else {
                self.diag.error(
                    self.last_line,
                    &format!("Expected {} instructions, found {}.", count, program.len()),
                );
                return None;
            };
            program.push(self.parse_instruction(line, &fields)?);
        }
        // Anything past the last instruction is ignored.
        Some(program)
    }

    /// The next non-blank line split into whitespace separated fields,
    /// along with its 1-based line number.
    fn next_record(&mut self) -> Option<(u32, Vec<&'src str>)> {
        for (num, line) in self.lines.by_ref() {
            self.last_line = num as u32 + 1;
            let fields: Vec<_> = line.split_whitespace().collect();
            if !fields.is_empty() {
                return Some((self.last_line, fields));
            }
        }
        None
    }

    fn parse_count(&mut self, line: u32, fields: &[&str]) -> Option<usize> {
        match fields[0].parse() {
            Ok(count) => Some(count),
            Err(_) => {
                self.diag.error(
                    line,
                    &format!("Invalid instruction count '{}'.", fields[0]),
                );
                None
            }
        }
    }

    fn parse_instruction(&mut self, line: u32, fields: &[&str]) -> Option<Instruction> {
        if fields.len() < 2 {
            self.diag
                .error(line, "Expected an instruction id and an opcode.");
            return None;
        }
        let id = self.parse_id(line, fields[0])?;
        match fields[1] {
            "ACTION" => Some(Instruction::Action(id)),
            opcode @ ("BRANCH" | "JUMP") => {
                let Some(target) = fields.get(2) else {
                    self.diag
                        .error(line, &format!("{opcode} requires a target id."));
                    return None;
                };
                let target = self.parse_id(line, target)?;
                if opcode == "BRANCH" {
                    Some(Instruction::Branch(id, target))
                } else {
                    Some(Instruction::Jump(id, target))
                }
            }
            opcode => {
                self.diag.error(line, &format!("Unknown opcode '{opcode}'."));
                None
            }
        }
    }

    fn parse_id(&mut self, line: u32, text: &str) -> Option<CmdId> {
        match text.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                self.diag
                    .error(line, &format!("Invalid instruction id '{text}'."));
                None
            }
        }
    }
}
