use aligo_sms::{AligoNodeBuilder, Config, CredentialDescriptor, InputItem, Operation, Vars};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "demos/send/aligo.toml".to_string());
    let config = Config::create(&path).unwrap();

    let node = AligoNodeBuilder::from_config(Operation::Send, &config).build().unwrap();

    let transport = aligo_sms::HttpTransport::new(config.timeout()).unwrap();
    if let Err(e) = CredentialDescriptor::verify(config.credentials.as_ref().unwrap(), &config.base_url, &transport).await {
        println!("Credentials rejected: {}", e);
        return;
    }

    let params = Vars::try_from(json!({
        "sender": "01012345678",
        "receiver": "01098765432,01011112222",
        "msg": "Hello from aligo-sms",
        "additionalFields": { "testmode_yn": true }
    }))
    .unwrap();

    let entries = node.execute(&[InputItem::new(params)]).await.unwrap();
    println!("Outputs: {:#}", serde_json::to_value(&entries).unwrap());
}
