use clap::Parser;

#[derive(Parser)]
#[command(name = "repcount", version, about = "Workout session tracking API")]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Path to the SQLite database file
    #[arg(long, env = "SQLITE_PATH", default_value = "fitness.db")]
    pub db: String,
}
