//! Output formatting for create command results.

use super::execute::CreateResult;
use crate::output::Outputable;

impl Outputable for CreateResult {
    fn to_table(&self) -> String {
        let mut lines = vec!["Connection query:".to_string(), self.descriptor.clone()];

        if !self.statements.is_empty() {
            lines.push(String::new());
            lines.push("SQL:".to_string());
            for statement in &self.statements {
                lines.push(format!("{};", statement));
            }
        }

        lines.push(String::new());
        lines.push(format!("DONE ({:?})", self.elapsed));
        lines.join("\n")
    }
}
