//! Output formatting for drop command results.

use super::execute::DropResult;
use crate::output::Outputable;

impl Outputable for DropResult {
    fn to_table(&self) -> String {
        let mut lines = vec!["Connection query:".to_string(), self.descriptor.clone()];

        if !self.statements.is_empty() {
            lines.push(String::new());
            lines.push("SQL:".to_string());
            lines.extend(self.statements.iter().map(|s| format!("{};", s)));
        }

        if let Some(path) = &self.removed_file {
            lines.push(String::new());
            lines.push(format!("Removed file: {}", path));
        }

        lines.push(String::new());
        lines.push(format!("DONE ({:?})", self.elapsed));
        lines.join("\n")
    }
}
