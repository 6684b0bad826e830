use request_log::RequestLogLayer;
use tokio::net::TcpListener;

use mock_server::AppState;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    let app = mock_server::app(AppState::new()).layer(RequestLogLayer::stdout());
    mock_server::serve(listener, app).await
}
