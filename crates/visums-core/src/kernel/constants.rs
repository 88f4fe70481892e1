/// Application name
pub const APP_NAME: &str = "Visums";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base settings file, read first
pub const BASE_ENV_FILE: &str = ".env";

/// Local override settings file, read second and optional
pub const LOCAL_ENV_FILE: &str = ".env.local";

/// Logical name of the database component
pub const DB_COMPONENT: &str = "db";

/// Setting holding a complete database connection string
pub const DSN_KEY: &str = "DSN";

/// Discrete settings a DSN is synthesized from when `DSN` is unset
pub const DB_TYPE_KEY: &str = "dbtype";
pub const DB_USER_KEY: &str = "dbuser";
pub const DB_PASSWORD_KEY: &str = "dbpassword";
pub const DB_HOST_KEY: &str = "dbhost";
pub const DB_PORT_KEY: &str = "dbport";
pub const DB_NAME_KEY: &str = "db";

/// All discrete connection settings, in DSN order
pub const DB_CONNECTION_KEYS: [&str; 6] = [
    DB_TYPE_KEY,
    DB_USER_KEY,
    DB_PASSWORD_KEY,
    DB_HOST_KEY,
    DB_PORT_KEY,
    DB_NAME_KEY,
];
