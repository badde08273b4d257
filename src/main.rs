#[actix_web::main]
async fn main() -> std::io::Result<()> {
    holdings_dashboard_lib::run().await
}
