#[tokio::main]
async fn main() {
    if let Err(err) = sidang_rust::run().await {
        eprintln!("sidang-api failed: {err:#}");
        std::process::exit(1);
    }
}
