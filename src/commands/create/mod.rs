mod execute;
mod output;
mod output_tests;

use clap::Args;

use super::ConnectionArgs;

pub use execute::CreateResult;

/// Create a database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  mig create --driver sqlite3 --dbname app --dbpath ./data/
  mig create --driver mysql --dbname shop -u root -p secret --charset utf8mb4
  mig create --driver postgres --dbname shop -u admin --host db.internal")]
pub struct CreateCmd {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}
