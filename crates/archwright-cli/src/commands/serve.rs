//! `archwright serve` - Start the HTTP JSON API.

use std::path::PathBuf;

use archwright_core::ArchwrightConfig;
use archwright_server::ArchwrightServer;

pub async fn run(
    mut config: ArchwrightConfig,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if static_dir.is_some() {
        config.server.static_dir = static_dir;
    }

    let pipeline = super::build_pipeline(&config)?;
    let server = ArchwrightServer::new(config.server, pipeline);
    println!("Archwright API on http://{}", server.bind_addr());
    server.run().await?;
    Ok(())
}
