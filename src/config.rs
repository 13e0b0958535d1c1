use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: String,
    pub request_timeout_secs: u64,

    /// Vertical scale used by the week renderer.
    pub pixels_per_hour: f64,

    /// Where per-user daily-analysis results are cached.
    pub cache_dir: PathBuf,

    pub pomodoro_focus_mins: u32,
    pub pomodoro_short_break_mins: u32,
    pub pomodoro_long_break_mins: u32,
    pub pomodoro_sessions_per_long_break: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("ACEIT_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            api_token: env::var("ACEIT_API_TOKEN").unwrap_or_else(|_| String::new()),
            request_timeout_secs: env::var("ACEIT_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("ACEIT_REQUEST_TIMEOUT_SECS must be a number"),

            pixels_per_hour: env::var("ACEIT_PIXELS_PER_HOUR")
                .unwrap_or_else(|_| "48".into())
                .parse()
                .expect("ACEIT_PIXELS_PER_HOUR must be a number"),

            cache_dir: env::var("ACEIT_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".aceit-cache")),

            pomodoro_focus_mins: env::var("ACEIT_POMODORO_FOCUS_MINS")
                .unwrap_or_else(|_| "25".into())
                .parse()
                .unwrap_or(25),
            pomodoro_short_break_mins: env::var("ACEIT_POMODORO_SHORT_BREAK_MINS")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .unwrap_or(5),
            pomodoro_long_break_mins: env::var("ACEIT_POMODORO_LONG_BREAK_MINS")
                .unwrap_or_else(|_| "15".into())
                .parse()
                .unwrap_or(15),
            pomodoro_sessions_per_long_break: env::var("ACEIT_POMODORO_SESSIONS")
                .unwrap_or_else(|_| "4".into())
                .parse()
                .unwrap_or(4),
        }
    }
}
