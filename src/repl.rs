//! Line-oriented command interpreter.
//!
//! One command per input line, each response preceded by the `db > `
//! prompt marker. Statements (`insert`, `select`) go through a prepare step
//! that validates arguments before anything touches the storage engine;
//! meta commands (`.exit`, `.constants`, `.btree`) are thin wrappers over
//! table introspection. The engine itself never prints: every outcome
//! arrives here as a typed value and is rendered to exactly one line (or
//! block) of text.

use crate::error::{DbError, Result};
use crate::row::Row;
use crate::table::{LayoutConstants, Table};
use std::io::{BufRead, Write};

/// The prompt marker written before each command is read
pub const PROMPT: &str = "db > ";

/// An interpreted statement, ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// A recognized meta command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaCommand {
    Exit,
    Constants,
    Btree,
}

impl MetaCommand {
    fn parse(line: &str) -> Option<Self> {
        match line {
            ".exit" => Some(Self::Exit),
            ".constants" => Some(Self::Constants),
            ".btree" => Some(Self::Btree),
            _ => None,
        }
    }
}

/// Translate one input line into a statement.
///
/// Insert takes exactly three arguments. The id sign is checked before the
/// field lengths, so a negative id with an oversized field reports the id
/// error.
pub fn prepare_statement(line: &str) -> Result<Statement> {
    let mut tokens = line.split_whitespace();

    match tokens.next() {
        Some("insert") => {
            let (id, username, email) = match (
                tokens.next(),
                tokens.next(),
                tokens.next(),
                tokens.next(),
            ) {
                (Some(id), Some(username), Some(email), None) => (id, username, email),
                _ => return Err(DbError::SyntaxError),
            };

            let id: i64 = id.parse().map_err(|_| DbError::SyntaxError)?;
            if id < 0 {
                return Err(DbError::NegativeId);
            }
            // Values beyond the unsigned 32-bit wire width cannot be stored.
            let id = u32::try_from(id).map_err(|_| DbError::SyntaxError)?;

            Ok(Statement::Insert(Row::new(id, username, email)?))
        }
        // Trailing tokens after `select` are ignored.
        Some("select") => Ok(Statement::Select),
        _ => Err(DbError::UnrecognizedStatement(line.to_string())),
    }
}

/// Execute a statement against the table, writing result lines.
fn execute_statement<W: Write>(statement: Statement, table: &mut Table, out: &mut W) -> Result<()> {
    match statement {
        Statement::Insert(row) => {
            table.insert(&row)?;
        }
        Statement::Select => {
            let mut cursor = table.cursor()?;
            while !cursor.end_of_table() {
                writeln!(out, "{}", cursor.current_row()?)?;
                cursor.advance()?;
            }
        }
    }
    writeln!(out, "Executed")?;
    Ok(())
}

/// Render a recoverable error as its user-visible line.
///
/// Returns the error back if it is fatal, so the loop can terminate.
fn report_error<W: Write>(err: DbError, out: &mut W) -> Result<()> {
    if err.is_fatal() {
        return Err(err);
    }

    let line = match &err {
        DbError::DuplicateKey(_) => "Error: duplicate key".to_string(),
        DbError::TableFull => "Error: table full".to_string(),
        DbError::FieldTooLong { .. } => "Field is too long".to_string(),
        DbError::NegativeId => "Id cannot be negative".to_string(),
        DbError::SyntaxError => "Syntax error. Could not parse statement".to_string(),
        DbError::UnrecognizedStatement(input) => {
            format!("Unrecognized command at the start of {}", input)
        }
        DbError::UnrecognizedMeta(input) => {
            format!("Unrecognized meta command: {}", input)
        }
        DbError::Io(_) | DbError::PageOutOfBounds(_) | DbError::Corruption(_) => unreachable!(),
    };
    writeln!(out, "{}", line)?;
    Ok(())
}

/// Run the command loop until `.exit` or end of input.
///
/// Both exits are orderly: all pages are flushed and the file is closed.
/// Fatal errors propagate to the caller with the table left unflushed.
pub fn run<R: BufRead, W: Write>(mut table: Table, mut input: R, mut out: W) -> Result<()> {
    let mut line = String::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // End of input behaves like .exit.
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('.') {
            match MetaCommand::parse(line) {
                Some(MetaCommand::Exit) => break,
                Some(MetaCommand::Constants) => {
                    write!(out, "{}", LayoutConstants::get())?;
                }
                Some(MetaCommand::Btree) => match table.export_tree() {
                    Ok(dump) => write!(out, "{}", dump)?,
                    Err(err) => report_error(err, &mut out)?,
                },
                None => {
                    report_error(DbError::UnrecognizedMeta(line.to_string()), &mut out)?;
                }
            }
            continue;
        }

        let outcome = prepare_statement(line)
            .and_then(|statement| execute_statement(statement, &mut table, &mut out));
        if let Err(err) = outcome {
            report_error(err, &mut out)?;
        }
    }

    table.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_insert() {
        let statement = prepare_statement("insert 1 username email@email.com").unwrap();
        let row = Row::new(1, "username", "email@email.com").unwrap();
        assert_eq!(statement, Statement::Insert(row));
    }

    #[test]
    fn test_prepare_insert_arity() {
        assert!(matches!(
            prepare_statement("insert 1 onlyuser").unwrap_err(),
            DbError::SyntaxError
        ));
        assert!(matches!(
            prepare_statement("insert 1 user email extra").unwrap_err(),
            DbError::SyntaxError
        ));
    }

    #[test]
    fn test_prepare_insert_negative_id() {
        assert!(matches!(
            prepare_statement("insert -1 a b").unwrap_err(),
            DbError::NegativeId
        ));
    }

    #[test]
    fn test_negative_id_reported_before_field_length() {
        let long_username = "a".repeat(40);
        let err = prepare_statement(&format!("insert -1 {} b", long_username)).unwrap_err();
        assert!(matches!(err, DbError::NegativeId));
    }

    #[test]
    fn test_prepare_insert_field_too_long() {
        let err = prepare_statement(&format!("insert 1 {} b", "a".repeat(33))).unwrap_err();
        assert!(matches!(err, DbError::FieldTooLong { .. }));
    }

    #[test]
    fn test_prepare_insert_id_overflow() {
        assert!(matches!(
            prepare_statement("insert 4294967296 a b").unwrap_err(),
            DbError::SyntaxError
        ));
        assert!(matches!(
            prepare_statement("insert notanumber a b").unwrap_err(),
            DbError::SyntaxError
        ));
    }

    #[test]
    fn test_prepare_select_ignores_trailing_tokens() {
        assert_eq!(prepare_statement("select").unwrap(), Statement::Select);
        assert_eq!(
            prepare_statement("select * from table").unwrap(),
            Statement::Select
        );
    }

    #[test]
    fn test_prepare_unrecognized() {
        assert!(matches!(
            prepare_statement("update 1 a b").unwrap_err(),
            DbError::UnrecognizedStatement(_)
        ));
    }

    #[test]
    fn test_meta_command_parse() {
        assert_eq!(MetaCommand::parse(".exit"), Some(MetaCommand::Exit));
        assert_eq!(MetaCommand::parse(".constants"), Some(MetaCommand::Constants));
        assert_eq!(MetaCommand::parse(".btree"), Some(MetaCommand::Btree));
        assert_eq!(MetaCommand::parse(".tables"), None);
    }
}
