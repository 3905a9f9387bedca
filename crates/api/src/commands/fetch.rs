use chrono::NaiveDate;
use daysheet_core::GenerateOptions;
use daysheet_domain::{DayDiagnostics, Result};
use serde::Serialize;

use crate::cli::RangeArgs;
use crate::context::AppContext;

/// Summary printed by `daysheet fetch`
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutput {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: usize,
    pub from_cache: usize,
    pub diagnostics: Vec<DayDiagnostics>,
}

/// Fill the cache for a range without summarizing.
pub async fn fetch(ctx: &AppContext, range: RangeArgs, refresh: bool) -> Result<FetchOutput> {
    let (from, to) = range.resolve(ctx.today(), ctx.config.report.default_days);
    let service = ctx.timesheet_service()?;
    let days = service.fetch_range(from, to, GenerateOptions { refresh }).await?;

    Ok(FetchOutput {
        from,
        to,
        days: days.len(),
        from_cache: days.iter().filter(|d| d.from_cache).count(),
        diagnostics: days.into_iter().filter(|d| !d.is_clean()).collect(),
    })
}
