//! Encodes two records through the compact encoder, writes the stream to a
//! file, reads it back without the layout, and prints every decoded field.

use std::fs::File;

use stride_pack::{decode, encode_into, resolve, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // struct { int i; char s1[4]; unsigned u; char s2[5]; }
    let layout = resolve("is04us05")?;
    let fields = layout.fields();

    let rows: [(i32, &[u8], u32, &[u8]); 2] =
        [(-128, b"abc", 256, b"defg"), (999, b"xyz", 1024, b"ghijk")];

    // Lay the rows down the way the equivalent struct array sits in memory;
    // unused string capacity stays zeroed.
    let mut buf = vec![0u8; rows.len() * layout.stride()];
    for (r, &(a, s1, u, s2)) in rows.iter().enumerate() {
        let base = r * layout.stride();
        buf[base + fields[0].offset..][..4].copy_from_slice(&a.to_ne_bytes());
        buf[base + fields[1].offset..][..s1.len()].copy_from_slice(s1);
        buf[base + fields[2].offset..][..4].copy_from_slice(&u.to_ne_bytes());
        buf[base + fields[3].offset..][..s2.len()].copy_from_slice(s2);
    }

    let mut out = File::create("records.bin")?;
    encode_into(&mut out, rows.len(), &buf, &layout)?;

    let stream = std::fs::read("records.bin")?;
    let decoder = decode(&stream);
    println!("Records: {}", decoder.record_count());

    for record in decoder.records()? {
        println!();
        for value in record {
            match value {
                Value::Unsigned(v) => println!("(uns) {} ({:08x})", v, v),
                Value::Signed(v) => println!("(int) {} ({:08x})", v, v as u32),
                Value::Text(_) => println!("(str) {}", value),
            }
        }
    }

    Ok(())
}
