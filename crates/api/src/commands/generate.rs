use chrono::NaiveDate;
use daysheet_core::GenerateOptions;
use daysheet_domain::{DashboardRow, DayDiagnostics, RemarkOrigin, Result};
use serde::Serialize;

use crate::cli::RangeArgs;
use crate::context::AppContext;

/// Report printed by `daysheet generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub rows: Vec<DashboardRow>,
    /// How each row's remark was produced, parallel to `rows`
    pub remark_origins: Vec<RemarkOrigin>,
    /// Only days with at least one failure
    pub diagnostics: Vec<DayDiagnostics>,
}

pub async fn generate(ctx: &AppContext, range: RangeArgs, refresh: bool) -> Result<GenerateOutput> {
    let (from, to) = range.resolve(ctx.today(), ctx.config.report.default_days);
    let service = ctx.timesheet_service()?;
    let report = service.generate(from, to, GenerateOptions { refresh }).await?;

    Ok(GenerateOutput {
        from: report.from,
        to: report.to,
        rows: report.rows.iter().map(|row| row.to_dashboard()).collect(),
        remark_origins: report.rows.iter().map(|row| row.remark_origin).collect(),
        diagnostics: report.diagnostics.into_iter().filter(|d| !d.is_clean()).collect(),
    })
}
