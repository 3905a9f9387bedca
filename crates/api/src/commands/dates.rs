use chrono::NaiveDate;
use daysheet_domain::Result;

use crate::context::AppContext;

pub fn cached_dates(ctx: &AppContext) -> Result<Vec<NaiveDate>> {
    ctx.log_cache.list_available_dates()
}
