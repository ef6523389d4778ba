//! Output formatting for describe command results.

use super::execute::DescribeResult;
use crate::output::Outputable;

impl Outputable for DescribeResult {
    fn to_table(&self) -> String {
        [
            "Connection query:".to_string(),
            self.descriptor.clone(),
            String::new(),
            "SQL:".to_string(),
            format!("{};", self.statement),
            String::new(),
            "Result:".to_string(),
            self.result.to_table(),
            String::new(),
            format!("DONE ({:?})", self.elapsed),
        ]
        .join("\n")
    }
}
