// config.rs
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub jwt_secret: String,
    pub port: u16,
    // Payment gateway configuration
    pub paystack_secret_key: String,
    // Bank account shown for manual package payments
    pub platform_bank_name: String,
    pub platform_bank_account: String,
    pub platform_bank_holder: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let app_url = std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

        let paystack_secret_key = std::env::var("PAYSTACK_SECRET_KEY")
            .unwrap_or_else(|_| "test_secret_key".to_string());

        let platform_bank_name = std::env::var("PLATFORM_BANK_NAME")
            .unwrap_or_else(|_| "First Bank".to_string());
        let platform_bank_account = std::env::var("PLATFORM_BANK_ACCOUNT")
            .unwrap_or_else(|_| "0000000000".to_string());
        let platform_bank_holder = std::env::var("PLATFORM_BANK_HOLDER")
            .unwrap_or_else(|_| "PropNest Ltd".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        Config {
            database_url,
            app_url,
            jwt_secret,
            port,
            paystack_secret_key,
            platform_bank_name,
            platform_bank_account,
            platform_bank_holder,
        }
    }
}
