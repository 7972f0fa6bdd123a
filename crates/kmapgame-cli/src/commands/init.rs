//! The `kmapgame init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("kmapgame.toml").exists() {
        println!("kmapgame.toml already exists, skipping.");
    } else {
        std::fs::write("kmapgame.toml", SAMPLE_CONFIG)?;
        println!("Created kmapgame.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point server_url at your scoring service");
    println!("  2. Run: kmapgame play --name <you> --difficulty medium");
    println!("  3. Run: kmapgame attack --name <you> --tier easy");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# kmapgame configuration

# Base URL of the scoring service.
server_url = "http://localhost:8000"

# Per-request timeout in seconds.
request_timeout_secs = 30
"#;
