use clap::Args;

#[derive(Debug, Args)]
pub struct Config {
    #[clap(long, env, default_value_t = String::from("127.0.0.1"))]
    pub host: String,
    #[clap(short, long, env, default_value_t = 7205)]
    pub port: u16,

    /// `development` enables readable logs and unobfuscated errors
    #[clap(long, env, default_value_t = String::from("production"))]
    pub env: String,

    #[clap(long = "db", env)]
    pub database_url: String,

    #[clap(long, env, default_value_t = 32)]
    pub database_pool_size: usize,

    /// Base64-encoded key of at least 64 bytes, used to sign session cookies
    #[clap(long, env)]
    pub cookie_key: String,

    #[clap(long, env, default_value_t = String::from("sid"))]
    pub session_cookie_name: String,
}

impl Config {
    pub fn production(&self) -> bool {
        self.env != "development" && !cfg!(debug_assertions)
    }
}
