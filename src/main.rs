#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    turnos_backend::run().await;
}
