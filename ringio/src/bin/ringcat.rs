//! ringcat CLI Demo
//!
//! Streams a file through a ring buffer line by line and prints the lines,
//! numbered, through a second ring buffer drained into stdout.
//!
//! Run with `RUST_LOG=trace` to watch the hook requests.

use ringio::{BufferConfig, FileSink, FileSource};

const MAX_LINE: usize = 4096;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: ringcat <file>");
        std::process::exit(2);
    };

    let config = BufferConfig::default();
    let mut input = FileSource::open(&path)?.into_buffer(&config);
    let mut output = FileSink::new(std::io::stdout()).into_buffer(&config);

    let mut line = vec![0u8; MAX_LINE];
    let mut number = 0u32;
    while let Some(text) = input.read_line(&mut line) {
        number += 1;
        output.write(format!("{number:6}\t").as_bytes())?;
        output.write(text)?;
        output.write(b"\n")?;
    }

    output.close()?;
    if let Some(e) = input.hook_mut().take_error() {
        return Err(e.into());
    }
    Ok(())
}
