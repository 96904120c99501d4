#[tokio::main]
async fn main() -> std::io::Result<()> {
    client_reporter::run().await
}
