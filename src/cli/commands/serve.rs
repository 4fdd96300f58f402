use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::service::server;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { listen } = cmd {
        let listen = listen.clone().unwrap_or_else(|| cfg.listen.clone());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(server::serve(cfg, &listen))?;
    }
    Ok(())
}
