use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_seconds: i64, // 24h by default
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_ttl_seconds: env::var("TOKEN_TTL_SECONDS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("TOKEN_TTL_SECONDS must be a number"),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
        }
    }
}
