#[tokio::main]
async fn main() {
    emotion_detector_lib::run().await
}
