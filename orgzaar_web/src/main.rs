use std::error::Error;

use axum_server::tls_rustls::RustlsConfig;
use orgzaar::OrgzaarConfig;
use orgzaar_web::AppState;
use tokio::net::lookup_host;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    match OrgzaarConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(config.log_level())
                .init();
            if let Err(error) = serve(&config).await {
                error!("アプリケーションエラー: {}", error);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("設定の読み込みに失敗: {}", error)
        }
    }
}

async fn serve(config: &OrgzaarConfig) -> Result<(), Box<dyn Error>> {
    let addr = lookup_host(config.server.address())
        .await?
        .next()
        .ok_or("アドレスを解決できません")?;
    let app = orgzaar_web::app(AppState::new(config.calendar.timezone));
    match &config.server.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            info!("https://{} で待ち受け開始", addr);
            axum_server::bind_rustls(addr, rustls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("http://{} で待ち受け開始", addr);
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
    }
    Ok(())
}
