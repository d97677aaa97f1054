use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "ironplan server")]
pub struct Cli {
    #[clap(long, env, default_value = "ironplan.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "8080")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,

    /// Seed the exercise catalog from the embedded list on startup
    #[arg(long, env, default_value = "true")]
    pub seed_exercises: bool,

    /// Deletes the database before starting the main program for debug purposes
    #[arg(long, env, default_value = "false")]
    pub debug_delete_database: bool,
}
