use nomad_blinkt_core::{
    test_utils::{frame_from_words, simulated_hardware, Step},
    Blinkt, RGB8, GAUGE_PALETTE,
};

fn word(level: u8, color: RGB8) -> [u8; 4] {
    [0xE0 | level, color.b, color.g, color.r]
}

#[test]
fn test_gauge_half_utilization() {
    let _ = env_logger::try_init();

    let (timeline, port, delay) = simulated_hardware();
    let mut blinkt = Blinkt::with_brightness(port, delay, 0.5);
    blinkt.show_anim_on_start = false;
    blinkt.setup().unwrap();

    let lit = blinkt.show_gauge(0.5, 0.5).unwrap();
    assert_eq!(lit, 4);

    let mut words = [[0xE0, 0, 0, 0]; 8];
    for (index, word_slot) in words.iter_mut().enumerate().take(4) {
        *word_slot = word(16, GAUGE_PALETTE[index]);
    }
    assert_eq!(
        timeline.steps(),
        vec![Step::Opened, Step::Frame(frame_from_words(words))]
    );
}

#[test]
fn test_gauge_full_and_overflow() {
    let (timeline, port, delay) = simulated_hardware();
    let mut blinkt = Blinkt::new(port, delay);
    blinkt.show_anim_on_start = false;
    blinkt.setup().unwrap();

    assert_eq!(blinkt.show_gauge(1.0, 1.0).unwrap(), 8);
    assert_eq!(blinkt.show_gauge(1.3, 1.0).unwrap(), 8);

    let green = RGB8 { r: 0, g: 255, b: 0 };
    let orange = RGB8 { r: 255, g: 165, b: 0 };
    let red = RGB8 { r: 255, g: 0, b: 0 };
    let mut words = [word(31, green); 8];
    words[6] = word(31, orange);
    words[7] = word(31, red);

    let full = frame_from_words(words);
    assert_eq!(timeline.frames(), vec![full, full]);
}

#[test]
fn test_gauge_empty_after_flash() {
    let (timeline, port, delay) = simulated_hardware();
    let mut blinkt = Blinkt::new(port, delay);
    blinkt.show_anim_on_start = false;
    blinkt.setup().unwrap();

    blinkt.flash_all(2, "FF0000").unwrap();
    assert_eq!(timeline.frames().len(), 4);
    assert_eq!(timeline.delays(), vec![30; 4]);

    timeline.clear();
    assert_eq!(blinkt.show_gauge(f64::NAN, 0.5).unwrap(), 0);
    assert_eq!(
        timeline.frames(),
        vec![frame_from_words([[0xE0, 0, 0, 0]; 8])]
    );
}

#[test]
fn test_flash_pixel_keeps_other_pixels() {
    let (timeline, port, delay) = simulated_hardware();
    let mut blinkt = Blinkt::new(port, delay);
    blinkt.show_anim_on_start = false;
    blinkt.setup().unwrap();
    blinkt.show_gauge(0.25, 1.0).unwrap();
    timeline.clear();

    blinkt.flash_pixel(5, 1, "0000ff").unwrap();

    let blue = RGB8 { r: 0, g: 0, b: 255 };
    let mut words = [[0xE0, 0, 0, 0]; 8];
    words[0] = word(31, GAUGE_PALETTE[0]);
    words[1] = word(31, GAUGE_PALETTE[1]);
    words[5] = word(31, blue);
    let on = frame_from_words(words);
    words[5] = word(0, blue);
    let off = frame_from_words(words);

    assert_eq!(timeline.frames(), vec![on, off]);
}

#[test]
#[should_panic(expected = "value should be between: 0.0 and 1.0")]
fn test_gauge_invalid_brightness() {
    let (_, port, delay) = simulated_hardware();
    let mut blinkt = Blinkt::new(port, delay);
    blinkt.show_anim_on_start = false;
    blinkt.setup().unwrap();

    let _ = blinkt.show_gauge(0.5, 2.0);
}
