use anyhow::Result;
use tracing::info;

use taskdeck_core::AppConfig;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    if init {
        let path = AppConfig::config_path();
        if path.exists() {
            println!("# {} already exists", path.display());
        } else {
            config.save()?;
            info!(path = %path.display(), "wrote default configuration");
            println!("# wrote {}", path.display());
        }
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
