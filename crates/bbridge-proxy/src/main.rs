use bbridge_core::GatewaySettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bbridge_proxy::load_dotenv();

    let settings = GatewaySettings::from_env()?;
    bbridge_proxy::init_tracing(settings.debug);

    bbridge_proxy::run(settings).await
}
