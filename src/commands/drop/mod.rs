mod execute;
mod output;

use clap::Args;

use super::ConnectionArgs;

pub use execute::DropResult;

/// Drop a database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  mig drop --driver sqlite3 --dbname app     # Removes ./app.db
  mig drop --driver mysql --dbname shop -u root -p secret")]
pub struct DropCmd {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}
