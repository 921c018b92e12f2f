#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("portfolio-motion runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use portfolio_motion::log::{LogLevel, Logger};

    if let Err(error) = portfolio_motion::frontend::run() {
        Logger::default().event(
            LogLevel::Warn,
            "motion.init_failed",
            serde_json::json!({ "error": error.to_string() }),
        );
    }
}
