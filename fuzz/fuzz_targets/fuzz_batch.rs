#![no_main]

//! Batch interpreter fuzzer.
//!
//! Feeds arbitrary bytes to the line-oriented interpreter. The parser must
//! never panic and never abort the session, whatever the input looks like.

use libfuzzer_sys::fuzz_target;
use std::io;
use tessera::batch::{run, Format};

fuzz_target!(|data: &[u8]| {
    // Unbounded board dimensions would allocate arbitrarily much, so pin
    // the creation line and fuzz only the command stream.
    let mut input = b"B 16 16 4 4\n".to_vec();
    input.extend_from_slice(data);

    run(input.as_slice(), io::sink(), io::sink(), Format::Text).unwrap();
    run(input.as_slice(), io::sink(), io::sink(), Format::Json).unwrap();
});
