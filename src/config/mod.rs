/// 환경 변수 기반 설정
/// `.env` 파일은 main에서 dotenvy로 먼저 읽어 둔다.
// region:    --- Imports
use std::fmt;
use std::str::FromStr;

// endregion: --- Imports

// region:    --- Defaults
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_PAGE_SIZE: usize = 500;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

// endregion: --- Defaults

// region:    --- Config Model
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub admin_token: String,
    pub store: StoreBackend,
    pub max_page_size: usize,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres(DatabaseConfig),
}

#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

// endregion: --- Config Model

// region:    --- Loading
impl AppConfig {
    /// 프로세스 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 조회 함수에서 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let admin_token = var("ADMIN_TOKEN").ok_or(ConfigError::Missing("ADMIN_TOKEN"))?;
        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;
        let max_page_size = parse_or("MAX_PAGE_SIZE", var("MAX_PAGE_SIZE"), DEFAULT_MAX_PAGE_SIZE)?;
        let body_limit_bytes = parse_or(
            "BODY_LIMIT_BYTES",
            var("BODY_LIMIT_BYTES"),
            DEFAULT_BODY_LIMIT_BYTES,
        )?;
        if max_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_PAGE_SIZE",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let database_url = var("DATABASE_URL");
        let backend = var("STORE_BACKEND").unwrap_or_else(|| {
            if database_url.is_some() {
                "postgres".to_string()
            } else {
                "memory".to_string()
            }
        });

        let store = match backend.to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" | "postgresql" => StoreBackend::Postgres(DatabaseConfig {
                url: database_url.ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    var("DATABASE_MAX_CONNECTIONS"),
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            }),
            _ => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: backend,
                    reason: "expected 'memory' or 'postgres'".to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            admin_token,
            store,
            max_page_size,
            body_limit_bytes,
        })
    }

    /// 바인드 주소
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

// endregion: --- Loading

// region:    --- Debug

// 관리자 토큰과 접속 정보는 로그에 남기지 않는다
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("admin_token", &"<redacted>")
            .field("store", &self.store)
            .field("max_page_size", &self.max_page_size)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

// endregion: --- Debug
