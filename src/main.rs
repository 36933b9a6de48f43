use sidecar_health::cli::run_cli;

fn main() -> anyhow::Result<()> {
    // Load .env file if it exists; configuration reads the environment afterwards
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    run_cli()
}
