//! Line-oriented script splitting and execution.
//!
//! Statements end on a line whose trimmed form ends with `;`. This is not a
//! SQL tokenizer: semicolons inside string literals, block comments or
//! procedural bodies split the statement. Whole-line `--` comments and blank
//! lines are skipped; trailing comments on a statement line are kept.

use async_trait::async_trait;

use crate::error::{Error, Result};

const TERMINATOR: char = ';';
const LINE_COMMENT: &str = "--";

/// Sink for complete statements, usually an open transaction.
#[async_trait]
pub trait StatementExecutor: Send {
    async fn execute(&mut self, statement: &str) -> Result<()>;
}

/// Splitter state after consuming a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitState {
    /// The buffer holds an unfinished statement (or nothing).
    Accumulating,
    /// The last line terminated a statement; the buffer must be emitted.
    Flush,
}

/// Incremental statement splitter fed one line at a time.
#[derive(Debug, Default)]
pub struct StatementSplitter {
    buffer: String,
}

impl StatementSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without its line terminator).
    ///
    /// Returns the completed statement when the line ends one and the
    /// collected text is not blank.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(LINE_COMMENT) {
            return None;
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');

        match transition(trimmed) {
            SplitState::Accumulating => None,
            SplitState::Flush => {
                let statement = finalize(&self.buffer);
                self.buffer.clear();
                statement
            }
        }
    }

    /// Consume the splitter and return any unterminated trailing statement.
    pub fn finish(self) -> Option<String> {
        finalize(&self.buffer)
    }
}

fn transition(trimmed: &str) -> SplitState {
    if trimmed.ends_with(TERMINATOR) {
        SplitState::Flush
    } else {
        SplitState::Accumulating
    }
}

fn finalize(buffer: &str) -> Option<String> {
    let mut text = buffer.trim();
    while let Some(rest) = text.strip_suffix(TERMINATOR) {
        text = rest.trim_end();
    }

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Lines of `script`, broken at `\n`, `\r\n` or a lone `\r`.
fn script_lines(script: &str) -> impl Iterator<Item = &str> {
    script
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Split a whole script into statements, in file order.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut splitter = StatementSplitter::new();
    let mut statements: Vec<String> = script_lines(script)
        .filter_map(|line| splitter.push_line(line))
        .collect();
    statements.extend(splitter.finish());
    statements
}

/// Execute every statement of `script` in order, stopping at the first
/// failure. Returns the number of statements executed.
///
/// Commit and rollback stay with the caller.
pub async fn execute_script<E>(executor: &mut E, script: &str) -> Result<usize>
where
    E: StatementExecutor + ?Sized,
{
    let mut splitter = StatementSplitter::new();
    let mut executed = 0;

    for line in script_lines(script) {
        if let Some(statement) = splitter.push_line(line) {
            run_statement(executor, &statement, executed + 1).await?;
            executed += 1;
        }
    }

    if let Some(statement) = splitter.finish() {
        run_statement(executor, &statement, executed + 1).await?;
        executed += 1;
    }

    Ok(executed)
}

async fn run_statement<E>(executor: &mut E, statement: &str, index: usize) -> Result<()>
where
    E: StatementExecutor + ?Sized,
{
    tracing::debug!(event = "statement_started", index, statement);
    executor
        .execute(statement)
        .await
        .map_err(|err| Error::Statement {
            index,
            source: Box::new(err),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        statements: Vec<String>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl StatementExecutor for Recorder {
        async fn execute(&mut self, statement: &str) -> Result<()> {
            if self.fail_on == Some(self.statements.len() + 1) {
                return Err(Error::Db(format!("rejected: {statement}")));
            }
            self.statements.push(statement.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn skips_leading_comment_and_strips_terminator() {
        let mut recorder = Recorder::default();
        let count = execute_script(&mut recorder, "-- comment\nCREATE TABLE t (a INTEGER);\n")
            .await
            .expect("execute script");

        assert_eq!(count, 1);
        assert_eq!(recorder.statements, vec!["CREATE TABLE t (a INTEGER)"]);
    }

    #[tokio::test]
    async fn executes_unterminated_final_statement_once() {
        let mut recorder = Recorder::default();
        let script = "CREATE DOMAIN d AS INTEGER;\nCREATE TABLE t (a d)\n";
        execute_script(&mut recorder, script)
            .await
            .expect("execute script");

        assert_eq!(
            recorder.statements,
            vec!["CREATE DOMAIN d AS INTEGER", "CREATE TABLE t (a d)"]
        );
    }

    #[tokio::test]
    async fn stops_at_first_failure_and_reports_index() {
        let mut recorder = Recorder {
            fail_on: Some(2),
            ..Recorder::default()
        };
        let script = "CREATE TABLE a (x INTEGER);\nCREATE TABLE b (;\nCREATE TABLE c (x INTEGER);\n";
        let err = execute_script(&mut recorder, script)
            .await
            .expect_err("second statement fails");

        assert!(matches!(err, Error::Statement { index: 2, .. }));
        assert_eq!(recorder.statements, vec!["CREATE TABLE a (x INTEGER)"]);
    }

    #[test]
    fn multi_line_statement_keeps_inner_lines() {
        let script = "CREATE TABLE t (\n    a INTEGER,\n\n    -- note\n    b VARCHAR(10)\n);\n";
        assert_eq!(
            split_statements(script),
            vec!["CREATE TABLE t (\n    a INTEGER,\n    b VARCHAR(10)\n)"]
        );
    }

    #[test]
    fn blank_and_comment_lines_contribute_nothing() {
        assert!(split_statements("\n   \n-- only comments\n  -- indented\n").is_empty());
        assert!(split_statements("").is_empty());
    }

    #[test]
    fn strips_every_trailing_terminator() {
        assert_eq!(split_statements("SELECT 1; ;;\n"), vec!["SELECT 1"]);
        assert!(split_statements(";\n  ;  \n").is_empty());
    }

    #[test]
    fn trailing_inline_comment_is_kept() {
        // The terminator test runs on the whole trimmed line, so the comment
        // hides the semicolon and the statement continues.
        let script = "CREATE TABLE a (x INTEGER); -- first\nCREATE TABLE b (x INTEGER);\n";
        assert_eq!(
            split_statements(script),
            vec!["CREATE TABLE a (x INTEGER); -- first\nCREATE TABLE b (x INTEGER)"]
        );
    }

    #[test]
    fn accepts_crlf_line_endings() {
        assert_eq!(
            split_statements("CREATE TABLE a (x INTEGER);\r\nCREATE TABLE b (y INTEGER);\r\n"),
            vec!["CREATE TABLE a (x INTEGER)", "CREATE TABLE b (y INTEGER)"]
        );
    }

    #[test]
    fn accepts_carriage_return_line_endings() {
        assert_eq!(
            split_statements("CREATE TABLE a (x INTEGER);\rCREATE TABLE b (y INTEGER);\r"),
            vec!["CREATE TABLE a (x INTEGER)", "CREATE TABLE b (y INTEGER)"]
        );
        assert_eq!(
            split_statements("CREATE TABLE t (\r    a INTEGER\r\n);\r\n-- done\r"),
            vec!["CREATE TABLE t (\n    a INTEGER\n)"]
        );
    }

    #[tokio::test]
    async fn executes_each_statement_on_carriage_return_lines() {
        let mut recorder = Recorder::default();
        let count = execute_script(
            &mut recorder,
            "CREATE TABLE a (x INTEGER);\rCREATE TABLE b (y INTEGER);\r",
        )
        .await
        .expect("execute script");

        assert_eq!(count, 2);
        assert_eq!(
            recorder.statements,
            vec!["CREATE TABLE a (x INTEGER)", "CREATE TABLE b (y INTEGER)"]
        );
    }

    #[test]
    fn splitter_reports_flush_transition() {
        assert_eq!(transition("a INTEGER,"), SplitState::Accumulating);
        assert_eq!(transition(");"), SplitState::Flush);

        let mut splitter = StatementSplitter::new();
        assert_eq!(splitter.push_line("CREATE TABLE t ("), None);
        assert_eq!(
            splitter.push_line("  a INTEGER);"),
            Some("CREATE TABLE t (\n  a INTEGER)".to_string())
        );
        assert_eq!(splitter.finish(), None);
    }
}
