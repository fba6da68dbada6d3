use httpmock::prelude::*;
use overlay_panel::form::OverlayForm;
use overlay_panel::overlay::Field;
use overlay_panel::submission::{HttpRenderService, RenderService, Submission};
use std::net::TcpListener;

fn service_for(server: &MockServer) -> HttpRenderService {
    HttpRenderService::new(&format!("{}/", server.base_url())).unwrap()
}

fn sample_submission() -> Submission {
    let mut form = OverlayForm::new();
    form.set_sample("beach.jpg");
    form.set_value(Field::FontName, "DejaVu Sans");
    form.text = "Hello".into();
    Submission::capture(&form).unwrap()
}

#[test]
fn posts_multipart_and_returns_image() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/process")
            .header_exists("content-type")
            .body_contains("name=\"text\"")
            .body_contains("name=\"font_name\"")
            .body_contains("name=\"font_size\"")
            .body_contains("name=\"box_width_percent\"")
            .body_contains("name=\"sample_image\"")
            .body_contains("DejaVu Sans")
            .body_contains("beach.jpg");
        then.status(200)
            .header("content-type", "image/jpeg")
            .body(b"\xff\xd8rendered");
    });
    let service = service_for(&server);

    let bytes = service.process(&sample_submission()).unwrap();
    assert_eq!(bytes, b"\xff\xd8rendered");
    m.assert();
}

#[test]
fn error_status_includes_server_message() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(400)
            .json_body(serde_json::json!({ "error": "Kein Bild ausgewaehlt" }));
    });
    let service = service_for(&server);

    let err = service.process(&sample_submission()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("400"), "{msg}");
    assert!(msg.contains("Kein Bild ausgewaehlt"), "{msg}");
}

#[test]
fn error_status_without_json_body() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(500)
            .header("content-type", "text/html")
            .body("<h1>boom</h1>");
    });
    let service = service_for(&server);

    let err = service.process(&sample_submission()).unwrap_err();
    assert!(format!("{err:#}").starts_with("processing failed (500"));
}

#[test]
fn fetches_sample_thumbnail() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path_contains("/sample_image/my")
            .path_contains("beach.png");
        then.status(200).header("content-type", "image/png").body("png");
    });
    let service = service_for(&server);

    assert_eq!(service.sample_image("my beach.png").unwrap(), b"png");
    m.assert();
}

#[test]
fn missing_thumbnail_is_an_error() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path_contains("/sample_image/");
        then.status(404);
    });
    let service = service_for(&server);

    assert!(service.sample_image("gone.png").is_err());
}

#[test]
fn unreachable_server_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let service = HttpRenderService::new(&format!("http://{addr}/")).unwrap();
    assert!(service.process(&sample_submission()).is_err());
}
