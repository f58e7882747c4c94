//! End-of-session report.

use crate::session::SessionSummary;
use nestkv_core::StatsSnapshot;
use clap::ValueEnum;
use serde::Serialize;

/// Output format of the session report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Session counters and engine statistics, printed on exit.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    /// Lines read.
    pub lines: u64,
    /// Commands executed.
    pub executed: u64,
    /// Lines skipped as malformed.
    pub ignored: u64,
    /// Whether the session ended with `END`.
    pub ended: bool,
    /// Transactions still open when the session stopped.
    pub open_transactions: usize,
    /// Engine operation counters.
    pub engine: EngineCounters,
}

/// Serializable copy of the engine counters.
#[derive(Debug, Serialize)]
pub struct EngineCounters {
    /// `GET` calls.
    pub reads: u64,
    /// `SET` calls.
    pub writes: u64,
    /// `UNSET` calls.
    pub deletes: u64,
    /// `NUMEQUALTO` calls.
    pub count_queries: u64,
    /// Transactions begun.
    pub transactions_begun: u64,
    /// Successful commits.
    pub commits: u64,
    /// Frames rolled back.
    pub rollbacks: u64,
    /// `COMMIT`/`ROLLBACK` with nothing open.
    pub no_transaction: u64,
}

impl From<StatsSnapshot> for EngineCounters {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            reads: stats.reads,
            writes: stats.writes,
            deletes: stats.deletes,
            count_queries: stats.count_queries,
            transactions_begun: stats.transactions_begun,
            commits: stats.commits,
            rollbacks: stats.rollbacks,
            no_transaction: stats.no_transaction,
        }
    }
}

impl SessionReport {
    /// Builds a report from a finished session.
    pub fn new(summary: SessionSummary, stats: StatsSnapshot, open_transactions: usize) -> Self {
        Self {
            lines: summary.lines,
            executed: summary.executed,
            ignored: summary.ignored,
            ended: summary.ended,
            open_transactions,
            engine: stats.into(),
        }
    }

    /// Renders the report in `format`.
    pub fn render(&self, format: ReportFormat) -> serde_json::Result<String> {
        match format {
            ReportFormat::Json => serde_json::to_string_pretty(self),
            ReportFormat::Text => Ok(self.to_text()),
        }
    }

    fn to_text(&self) -> String {
        let e = &self.engine;
        let mut out = String::new();
        out.push_str("Session\n");
        out.push_str(&format!("  lines read:        {}\n", self.lines));
        out.push_str(&format!("  commands executed: {}\n", self.executed));
        out.push_str(&format!("  lines ignored:     {}\n", self.ignored));
        out.push_str(&format!("  ended by END:      {}\n", self.ended));
        out.push_str(&format!("  open transactions: {}\n", self.open_transactions));
        out.push_str("Engine\n");
        out.push_str(&format!("  reads:   {}\n", e.reads));
        out.push_str(&format!("  writes:  {}\n", e.writes));
        out.push_str(&format!("  deletes: {}\n", e.deletes));
        out.push_str(&format!("  counts:  {}\n", e.count_queries));
        out.push_str(&format!(
            "  begin/commit/rollback: {}/{}/{}\n",
            e.transactions_begun, e.commits, e.rollbacks
        ));
        out.push_str(&format!("  no transaction: {}\n", e.no_transaction));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionReport {
        let summary = SessionSummary {
            lines: 4,
            executed: 3,
            ignored: 1,
            ended: true,
        };
        let stats = StatsSnapshot {
            writes: 2,
            transactions_begun: 1,
            ..StatsSnapshot::default()
        };
        SessionReport::new(summary, stats, 1)
    }

    #[test]
    fn renders_json() {
        let json = sample().render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["lines"], 4);
        assert_eq!(value["ended"], true);
        assert_eq!(value["open_transactions"], 1);
        assert_eq!(value["engine"]["writes"], 2);
    }

    #[test]
    fn renders_text() {
        let text = sample().render(ReportFormat::Text).unwrap();
        assert!(text.contains("commands executed: 3"));
        assert!(text.contains("begin/commit/rollback: 1/0/0"));
    }
}
