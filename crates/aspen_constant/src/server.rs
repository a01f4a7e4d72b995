//! llama-server endpoint defaults and sampling defaults.

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const COMPLETION_PATH: &str = "completion";
pub const HEALTH_PATH: &str = "health";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_HISTORY_PAIRS: usize = 2;
pub const DEFAULT_CTX_SIZE: usize = 2048;

pub const DEFAULT_N_PREDICT: u32 = 200;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.9;
pub const DEFAULT_REPEAT_PENALTY: f32 = 1.1;

/// Command shown when the pre-flight check fails. `{port}` is substituted.
pub const LAUNCH_HINT: &str = "./llama.cpp/build/bin/llama-server --model aspen-4b.gguf --host 127.0.0.1 --port {port} -ngl 0 --ctx-size 2048 --threads 6";

pub fn launch_hint(port: u16) -> String {
    LAUNCH_HINT.replace("{port}", &port.to_string())
}
