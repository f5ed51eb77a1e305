use anyhow::Result;
use deskscene::{AppConfig, run};

fn main() -> Result<()> {
    env_logger::init();
    run(AppConfig::default())
}
