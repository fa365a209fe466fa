//! urlshort: redirect server that maps request paths to URLs from inline
//! config, YAML and JSON record files, answering everything else itself.

mod config;
mod server;

use config::UrlshortConfig;

fn main() -> anyhow::Result<()> {
    // Determine config path
    let config_path = {
        let args: Vec<String> = std::env::args().collect();
        args.iter()
            .position(|a| a == "--config")
            .and_then(|i| args.get(i + 1).cloned())
            .or_else(|| args.get(1).filter(|a| !a.starts_with('-')).cloned())
            .or_else(|| std::env::var("URLSHORT_CONFIG").ok())
            .unwrap_or_else(|| "urlshort.toml".to_string())
    };

    let config = UrlshortConfig::load(&config_path)?;

    // The OTLP batch exporter needs a reactor, so tracing starts inside the runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let tracing_guard = urlshort_tracing::init_tracing(&config.tracing);

        tracing::info!(
            config_path = %config_path,
            listen_address = %config.server.listen_address,
            inline_redirects = config.redirects.paths.len(),
            yaml_file = ?config.redirects.yaml_file,
            json_file = ?config.redirects.json_file,
            otlp_export = tracing_guard.exporting(),
            "Starting urlshort"
        );

        server::run(config).await
    })
}
