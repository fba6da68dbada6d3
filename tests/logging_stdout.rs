use serial_test::serial;
use tracing::Level;

#[test]
#[serial]
fn first_init_wins_on_stdout() {
    overlay_panel::logging::init(false, None);
    assert!(tracing::enabled!(Level::INFO));
    assert!(!tracing::enabled!(Level::DEBUG));

    overlay_panel::logging::init(true, None);
    assert!(!tracing::enabled!(Level::DEBUG), "second init replaced the subscriber");
}
