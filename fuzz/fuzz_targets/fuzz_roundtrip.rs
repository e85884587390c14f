#![no_main]
use libfuzzer_sys::fuzz_target;

// Whatever the parser accepts, the writer must reproduce exactly.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut config = cfg::Config::with_sink(Box::new(cfg::NullSink));
        config.load_str(s);

        let text = config.to_text();
        let mut reparsed = cfg::Config::with_sink(Box::new(cfg::NullSink));
        reparsed.load_str(&text);
        assert_eq!(config.document(), reparsed.document());
    }
});
