//! Output formatting for sql command results.

use super::execute::SqlResult;
use crate::output::Outputable;

impl Outputable for SqlResult {
    fn to_table(&self) -> String {
        format!(
            "Executed {} statement(s), {} failed.\n\nDONE ({:?})",
            self.stats.executed, self.stats.failed, self.elapsed
        )
    }
}
