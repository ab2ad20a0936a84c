#[tokio::main]
async fn main() {
    photo_booking_backend::run().await;
}
