/// Summarizer used when no LLM provider is configured
use async_trait::async_trait;
use daysheet_core::timesheet::remark::compose_fallback_remark;
use daysheet_core::Summarizer;
use daysheet_domain::{RemarkInput, Result};

/// Returns the locally composed remark without calling any model.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComposedRemarkSummarizer;

#[async_trait]
impl Summarizer for ComposedRemarkSummarizer {
    async fn summarize(&self, input: &RemarkInput) -> Result<String> {
        Ok(compose_fallback_remark(input))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[tokio::test]
    async fn composes_from_commit_messages() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let input = RemarkInput::new(date, None, vec!["Fix login".into()]);

        let remark = ComposedRemarkSummarizer.summarize(&input).await.unwrap();
        assert!(remark.contains("Fix login"));
    }
}
