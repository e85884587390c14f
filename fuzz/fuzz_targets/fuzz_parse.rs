#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut config = cfg::Config::with_sink(Box::new(cfg::NullSink));
        config.load_str(s);
    }
});
