//! Local HTTP fixtures for tests

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Response, Server};

pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Serve requests on an ephemeral port; returns the base URL.
/// Each request is answered on its own thread so slow replies don't block others.
pub fn serve<F>(handler: F) -> String
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let handler = Arc::new(handler);

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let handler = handler.clone();
            std::thread::spawn(move || {
                let reply = handler(request.url());
                if let Some(delay) = reply.delay {
                    std::thread::sleep(delay);
                }
                let response = Response::from_data(reply.body).with_status_code(reply.status);
                let _ = request.respond(response);
            });
        }
    });

    format!("http://127.0.0.1:{}", port)
}

pub fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(width, height, image::Rgba(rgba))
}
