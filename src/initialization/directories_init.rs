use crate::config::Config;
use tracing::info;

use super::InitializationResult;

pub async fn ensure_directories(config: &Config) -> InitializationResult<()> {
    info!("Ensuring required directories exist");

    if let Some(parent) = config.session_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            info!("Created session directory: {:?}", parent);
        }
    }

    Ok(())
}
