use crate::app::view::render_state;
use crate::core::{TemperatureGateway, TemperaturePresenter};
use crate::domain::model::PresentationState;
use crate::utils::error::{ConvertError, ErrorSeverity, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Tally of a run. `worst` is the highest severity among failed conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub worst: Option<ErrorSeverity>,
}

impl SessionSummary {
    fn record_failure(&mut self, severity: ErrorSeverity) {
        self.failed += 1;
        self.worst = self.worst.max(Some(severity));
    }

    pub fn exit_code(&self) -> i32 {
        self.worst.map_or(0, ErrorSeverity::exit_code)
    }
}

/// Feeds values through a presenter one at a time and writes every state it
/// shows to `out`.
pub struct ConversionSession<'a, G: TemperatureGateway + 'static, W: Write> {
    presenter: &'a TemperaturePresenter<G>,
    out: W,
    json: bool,
    summary: SessionSummary,
}

impl<'a, G: TemperatureGateway + 'static, W: Write> ConversionSession<'a, G, W> {
    pub fn new(presenter: &'a TemperaturePresenter<G>, out: W, json: bool) -> Self {
        Self {
            presenter,
            out,
            json,
            summary: SessionSummary::default(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Converts one value and returns the state it settled in. Blank values
    /// are skipped (`Ok(None)`); any other rejected submission is an error.
    pub async fn convert(&mut self, value: &str) -> Result<Option<PresentationState>> {
        let mut states = self.presenter.subscribe();
        match self.presenter.submit(value) {
            Ok(()) => {}
            Err(ConvertError::ValidationError { .. }) => {
                tracing::warn!("Skipping blank value");
                self.summary.skipped += 1;
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        // a fast answer may already have replaced Loading
        let first = states.borrow_and_update().clone();
        self.show(&first)?;
        let settled = if first.is_settled() {
            first
        } else {
            let settled = states
                .wait_for(PresentationState::is_settled)
                .await
                .map_err(|_| ConvertError::ScopeClosed)?
                .clone();
            self.show(&settled)?;
            settled
        };

        match &settled {
            PresentationState::Error { .. } => {
                let severity = self
                    .presenter
                    .last_failure_severity()
                    .unwrap_or(ErrorSeverity::High);
                self.summary.record_failure(severity);
            }
            _ => self.summary.converted += 1,
        }
        Ok(Some(settled))
    }

    pub async fn run_values<I, S>(&mut self, values: I) -> Result<SessionSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.convert(value.as_ref()).await?;
        }
        Ok(self.summary)
    }

    /// One value per line until end of input.
    pub async fn run_lines<R: AsyncBufRead + Unpin>(&mut self, reader: R) -> Result<SessionSummary> {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            self.convert(&line).await?;
        }
        Ok(self.summary)
    }

    fn show(&mut self, state: &PresentationState) -> Result<()> {
        if let Some(line) = render_state(state, self.json) {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worst_severity_sets_exit_code() {
        let mut summary = SessionSummary::default();
        assert_eq!(summary.exit_code(), 0);

        summary.record_failure(ErrorSeverity::High);
        summary.record_failure(ErrorSeverity::Medium);
        assert_eq!(summary.worst, Some(ErrorSeverity::High));
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.exit_code(), 1);

        summary.record_failure(ErrorSeverity::Critical);
        assert_eq!(summary.exit_code(), 3);
    }
}
