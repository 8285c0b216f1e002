use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::Config;
use std::collections::HashMap;
use std::env;

/// Debug only secret for JWT encoding & decoding.
const SECRET: &str = "L2gZrkZzNkQUvLaPSdMeRgX3lNmJ4ivUhK/fsuiWrJE=";

pub const TOKEN_PREFIX: &str = "Token ";

pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub struct AppState {
    pub secret: Vec<u8>,
}

impl AppState {
    pub fn manage() -> AdHoc {
        AdHoc::on_ignite("Manage config", |rocket| async move {
            // Rocket doesn't expose its own secret_key, so we use our own here.
            let secret = env::var("SECRET_KEY").unwrap_or_else(|err| {
                if cfg!(debug_assertions) {
                    SECRET.to_string()
                } else {
                    panic!("No SECRET_KEY environment variable found: {:?}", err)
                }
            });

            rocket.manage(AppState {
                secret: secret.into_bytes(),
            })
        })
    }
}

/// Create rocket config from environment variables
pub fn from_env() -> Figment {
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .expect("PORT environment variable should parse to an integer");

    let database_url =
        env::var("DATABASE_URL").expect("No DATABASE_URL environment variable found");
    let mut database_config = HashMap::new();
    let mut databases = HashMap::new();
    database_config.insert("url", database_url);
    databases.insert("diesel_mysql_pool", database_config);

    Config::figment()
        .merge(("port", port))
        .merge(("databases", databases))
}
