use anyhow::Result;
use tokdex::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
