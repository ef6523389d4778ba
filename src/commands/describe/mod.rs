mod execute;
mod output;

use clap::Args;

use super::ConnectionArgs;

pub use execute::DescribeResult;

/// Describe the columns of a table
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  mig describe --driver sqlite3 --dbname app --table users
  mig describe --driver mysql --dbname shop -u root --tbl orders
  mig describe --driver postgres --dbname shop -u admin --table orders --format json")]
pub struct DescribeCmd {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Table name [default: scheme_info]
    #[arg(long, visible_alias = "tbl")]
    pub table: Option<String>,
}
