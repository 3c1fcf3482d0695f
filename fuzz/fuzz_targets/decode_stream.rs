#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for field in stride_pack::decode(data) {
        if field.is_err() {
            break;
        }
    }
});
