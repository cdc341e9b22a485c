use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub from_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub smtp: SmtpConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let username = std::env::var("SMTP_USERNAME")?;
        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            password: std::env::var("SMTP_PASSWORD")?,
            from_address: std::env::var("SMTP_FROM").unwrap_or_else(|_| username.clone()),
            from_name: std::env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Multifactor".into()),
            username,
        };
        Ok(Self { database_url, smtp })
    }
}
