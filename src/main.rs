use std::sync::Arc;

use codeserver::config::Config;
use codeserver::resources::{EmbeddedResources, LayeredResources, ResourceDir, Resources};
use codeserver::server::handler::DevHandler;
use codeserver::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level())
        .init();

    let files = ResourceDir::new(&cfg.resource_root);
    let bundled = EmbeddedResources::new()
        .with("index.html", include_bytes!("../assets/index.html"))
        .with("info.js", include_bytes!("../assets/info.js"));
    let layers: Vec<Box<dyn Resources>> = vec![Box::new(files.clone()), Box::new(bundled)];
    let resources: Arc<dyn Resources> = Arc::new(LayeredResources::new(layers));

    let handler = Arc::new(DevHandler::new(resources, files));

    tokio::select! {
        res = server::listener::run(&cfg, handler) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
