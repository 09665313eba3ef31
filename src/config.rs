#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) smtp_username: String,
    pub(crate) smtp_password: String,
    pub(crate) smtp_receiver: String,
}

pub(crate) static CONFIG: std::sync::LazyLock<Config> = std::sync::LazyLock::new(|| {
    dotenvy::dotenv().expect("Failed to load .env file");

    Config {
        smtp_username: std::env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set"),
        smtp_password: std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set"),
        smtp_receiver: std::env::var("SMTP_RECEIVER").expect("SMTP_RECEIVER not set"),
    }
});

pub(crate) fn config() -> &'static Config {
    &CONFIG
}
