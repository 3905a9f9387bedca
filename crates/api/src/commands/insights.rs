use daysheet_domain::{InsightsReport, Result};
use tracing::debug;

use crate::cli::RangeArgs;
use crate::context::AppContext;

/// Insights over the requested range.
///
/// With no range given, covers every cached day.
pub fn insights(ctx: &AppContext, range: RangeArgs) -> Result<InsightsReport> {
    let (from, to) = if range.is_empty() {
        let dates = ctx.log_cache.list_available_dates()?;
        match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => range.resolve(ctx.today(), ctx.config.report.default_days),
        }
    } else {
        range.resolve(ctx.today(), ctx.config.report.default_days)
    };
    debug!(%from, %to, "Resolved insights range");

    ctx.insights.report(from, to)
}
